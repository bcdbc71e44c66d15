use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, FromRepr, VariantNames};

/// A trait to provide the value and the documented domain of a mode flag.
pub trait ModeFlag: IntoEnumIterator + Copy {
    /// Get the value written in the parameter file.
    ///
    /// # Returns
    /// Value.
    fn value(&self) -> i64;

    /// Get all the values the flag is allowed to take.
    ///
    /// # Returns
    /// Domain of the flag in ascending order.
    fn domain() -> Vec<i64> {
        Self::iter().map(|flag| flag.value()).collect()
    }

    /// Get the flag from the value.
    ///
    /// # Arguments
    /// * `value` - Value written in the parameter file.
    ///
    /// # Returns
    /// Flag. None if the value is out of the domain.
    fn from_value(value: i64) -> Option<Self> {
        Self::iter().find(|flag| flag.value() == value)
    }
}

macro_rules! impl_mode_flag {
    ($($mode:ty),* $(,)?) => {
        $(
            impl ModeFlag for $mode {
                fn value(&self) -> i64 {
                    *self as i64
                }
            }
        )*
    };
}

impl_mode_flag!(
    LoggingLevel,
    LowPassFilterType,
    NotchFilterType,
    IpcControlMode,
    VsControlMode,
    PcControlMode,
    YawControlMode,
    SetpointSmootherMode,
    WindSpeedEstimatorMode,
    PitchSaturationMode,
    ShutdownMode,
    FloatingFeedbackMode,
    FlapControlMode,
);

/// Kind of the tokens of a parameter.
#[derive(Debug, PartialEq, Clone, Copy, AsRefStr)]
pub enum ValueKind {
    Integer,
    Float,
    Text,
}

/// Section of the parameter file. The order is the order of the sections in
/// a written file.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, EnumIter, AsRefStr, Serialize)]
pub enum Section {
    #[strum(serialize = "DEBUG")]
    Debug,
    #[strum(serialize = "CONTROLLER FLAGS")]
    ControllerFlags,
    #[strum(serialize = "FILTERS")]
    Filters,
    #[strum(serialize = "BLADE PITCH CONTROL")]
    BladePitchControl,
    #[strum(serialize = "INDIVIDUAL PITCH CONTROL")]
    IndividualPitchControl,
    #[strum(serialize = "VS TORQUE CONTROL")]
    TorqueControl,
    #[strum(serialize = "SETPOINT SMOOTHER")]
    SetpointSmoother,
    #[strum(serialize = "WIND SPEED ESTIMATOR")]
    WindSpeedEstimator,
    #[strum(serialize = "YAW CONTROL")]
    YawControl,
    #[strum(serialize = "TOWER FORE-AFT DAMPING")]
    TowerForeAftDamping,
    #[strum(serialize = "MINIMUM PITCH SATURATION")]
    MinimumPitchSaturation,
    #[strum(serialize = "SHUTDOWN")]
    Shutdown,
    #[strum(serialize = "FLOATING")]
    Floating,
    #[strum(serialize = "FLAP ACTUATION")]
    FlapActuation,
}

/// Debug output of the controller.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum LoggingLevel {
    NoDebugFiles = 0,
    Standard = 1,
    StandardAndAvrSwap = 2,
}

/// Type of the low-pass filter on the generator speed and pitch signals.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum LowPassFilterType {
    FirstOrder = 1,
    SecondOrder = 2,
}

/// Signals the notch filter is applied to.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum NotchFilterType {
    Disabled = 0,
    GeneratorSpeed = 1,
    TowerForeAft = 2,
    GeneratorSpeedAndTowerForeAft = 3,
}

/// Individual pitch control (IPC) mode.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum IpcControlMode {
    Off = 0,
    OneP = 1,
    OnePTwoP = 2,
}

/// Generator torque control mode in the above rated conditions.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum VsControlMode {
    ConstantTorque = 0,
    ConstantPower = 1,
    TsrTrackingConstantTorque = 2,
    TsrTrackingConstantPower = 3,
}

/// Blade pitch control mode.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum PcControlMode {
    FinePitch = 0,
    ActivePi = 1,
}

/// Yaw control mode.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum YawControlMode {
    Off = 0,
    YawRate = 1,
    YawByIpc = 2,
}

/// Setpoint smoother mode.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum SetpointSmootherMode {
    Off = 0,
    On = 1,
}

/// Wind speed estimator mode.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum WindSpeedEstimatorMode {
    LowPassFiltered = 0,
    ImmersionAndInvariance = 1,
    ExtendedKalmanFilter = 2,
}

/// Pitch saturation mode.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum PitchSaturationMode {
    Off = 0,
    PeakShaving = 1,
    CpMaximizing = 2,
    PeakShavingAndCpMaximizing = 3,
}

/// Shutdown mode.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum ShutdownMode {
    Off = 0,
    PitchToMax = 1,
}

/// Floating specific feedback mode.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum FloatingFeedbackMode {
    Off = 0,
    NacelleVelocity = 1,
}

/// Flap control mode.
#[derive(FromRepr, Debug, PartialEq, Clone, Copy, EnumIter, VariantNames, Serialize)]
#[repr(u8)]
pub enum FlapControlMode {
    Off = 0,
    SteadyState = 1,
    Proportional = 2,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::VariantNames;

    #[test]
    fn test_value() {
        assert_eq!(VsControlMode::ConstantTorque.value(), 0);
        assert_eq!(VsControlMode::TsrTrackingConstantPower.value(), 3);

        assert_eq!(LowPassFilterType::FirstOrder.value(), 1);
    }

    #[test]
    fn test_domain() {
        assert_eq!(LoggingLevel::domain(), vec![0, 1, 2]);
        assert_eq!(LowPassFilterType::domain(), vec![1, 2]);
        assert_eq!(VsControlMode::domain(), vec![0, 1, 2, 3]);
        assert_eq!(PitchSaturationMode::domain(), vec![0, 1, 2, 3]);
        assert_eq!(FlapControlMode::domain(), vec![0, 1, 2]);
    }

    #[test]
    fn test_from_value() {
        assert_eq!(
            VsControlMode::from_value(2),
            Some(VsControlMode::TsrTrackingConstantTorque)
        );
        assert_eq!(VsControlMode::from_value(5), None);

        // No zero for the filter type.
        assert_eq!(LowPassFilterType::from_value(0), None);
        assert_eq!(YawControlMode::from_value(-1), None);

        // Same as the repr.
        assert_eq!(
            ShutdownMode::from_repr(1).unwrap(),
            ShutdownMode::from_value(1).unwrap()
        );
    }

    #[test]
    fn test_section() {
        assert_eq!(Section::Debug.as_ref(), "DEBUG");
        assert_eq!(Section::TorqueControl.as_ref(), "VS TORQUE CONTROL");

        assert_eq!(Section::iter().count(), 14);
        assert_eq!(Section::iter().last(), Some(Section::FlapActuation));
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(
            WindSpeedEstimatorMode::VARIANTS,
            &[
                "LowPassFiltered",
                "ImmersionAndInvariance",
                "ExtendedKalmanFilter"
            ]
        );
    }
}
