// This file is part of discon_params.
//
// Developed for the Vera Rubin Observatory Systems.
// This product includes software developed by the LSST Project
// (https://www.lsst.org).
// See the COPYRIGHT file at the top-level directory of this distribution
// for details of code ownership.
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use serde::Serialize;

use crate::config::ConfigurationSet;
use crate::enums::{
    FlapControlMode, FloatingFeedbackMode, IpcControlMode, LoggingLevel, LowPassFilterType,
    NotchFilterType, PcControlMode, PitchSaturationMode, SetpointSmootherMode, ShutdownMode,
    VsControlMode, WindSpeedEstimatorMode, YawControlMode,
};
use crate::error::LoadError;

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ControllerFlags {
    pub logging_level: LoggingLevel,
    pub low_pass_filter_type: LowPassFilterType,
    pub notch_filter_type: NotchFilterType,
    pub ipc_control_mode: IpcControlMode,
    pub vs_control_mode: VsControlMode,
    pub pc_control_mode: PcControlMode,
    pub yaw_control_mode: YawControlMode,
    pub setpoint_smoother_mode: SetpointSmootherMode,
    pub wind_speed_estimator_mode: WindSpeedEstimatorMode,
    pub pitch_saturation_mode: PitchSaturationMode,
    pub shutdown_mode: ShutdownMode,
    pub floating_feedback_mode: FloatingFeedbackMode,
    pub flap_control_mode: FlapControlMode,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct Filters {
    // Corner frequency of the low-pass filters in rad/s.
    pub low_pass_corner_frequency: f64,
    // Damping of the second-order low-pass filter.
    pub low_pass_damping: f64,
    // Natural frequency of the notch filter in rad/s.
    pub notch_corner_frequency: f64,
    // Numerator and denominator damping of the notch filter.
    pub notch_beta_num_den: [f64; 2],
    // Corner frequency of the setpoint smoother in rad/s.
    pub setpoint_smoother_corner_frequency: f64,
    // Natural frequency (rad/s) and damping of the floating feedback filter.
    pub floating_corner_frequency: [f64; 2],
    // Corner frequency (rad/s) and damping of the flap control filter.
    pub flap_corner_frequency: [f64; 2],
}

/// Gain-schedule table of the blade pitch controller, indexed by the pitch
/// angle.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct GainSchedule {
    pub angles: Vec<f64>,
    pub kp: Vec<f64>,
    pub ki: Vec<f64>,
    pub kd: Vec<f64>,
    pub tf: Vec<f64>,
}

impl GainSchedule {
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct PitchControl {
    pub gain_schedule: GainSchedule,
    // Physical pitch limits in rad.
    pub max_pitch: f64,
    pub min_pitch: f64,
    // Pitch rate limits in rad/s.
    pub max_rate: f64,
    pub min_rate: f64,
    // Reference generator speed in rad/s.
    pub reference_speed: f64,
    // Below-rated pitch set-point in rad.
    pub fine_pitch: f64,
    // Angle above the minimum pitch to switch to the above-rated control in
    // rad.
    pub switch_angle: f64,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct IndividualPitchControl {
    // Integrator saturation in rad.
    pub integrator_saturation: f64,
    // Integral gains for the 1P and 2P reductions.
    pub ki: [f64; 2],
    // Azimuth offsets for the 1P and 2P reductions in rad.
    pub azimuth_offset: [f64; 2],
    // Corner frequency of the actuator model in rad/s. 0 disables it.
    pub actuator_corner_frequency: f64,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct TorqueControl {
    // Generator efficiency in %.
    pub generator_efficiency: f64,
    // Above rated torque saturation in Nm.
    pub above_rated_saturation_torque: f64,
    // Maximum torque rate in Nm/s.
    pub max_rate: f64,
    pub max_torque: f64,
    pub min_torque: f64,
    // Optimal mode minimum speed in rad/s.
    pub min_optimal_mode_speed: f64,
    // Region 2 torque constant in Nm/(rad/s)^2.
    pub region_2_constant: f64,
    // Rated power in W.
    pub rated_power: f64,
    // Rated torque in Nm.
    pub rated_torque: f64,
    // Rated generator speed in rad/s.
    pub reference_speed: f64,
    pub kp: Vec<f64>,
    pub ki: Vec<f64>,
    // Power-maximizing region 2 tip-speed-ratio.
    pub optimal_tip_speed_ratio: f64,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct SetpointSmoother {
    pub torque_gain: f64,
    pub pitch_gain: f64,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct WindSpeedEstimator {
    // Blade radius in m.
    pub blade_radius: f64,
    // Parameters of the CP(lambda) function.
    pub cp: Vec<f64>,
    // Adaption gain in m/rad.
    pub gamma: f64,
    pub gearbox_ratio: f64,
    // Total drivetrain inertia in kg m^2.
    pub total_inertia: f64,
    // Air density in kg/m^3.
    pub air_density: f64,
    // Rotor performance file. It is not opened by the loader.
    pub performance_filename: String,
    // Number of the blade pitch angles and tip-speed ratios in the rotor
    // performance tables.
    pub performance_table_size: (usize, usize),
    // Wind speeds (m/s) and the first-order system poles of the EKF.
    pub pole_wind_speeds: Vec<f64>,
    pub poles: Vec<f64>,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct YawControl {
    pub error_threshold: f64,
    pub ipc_integrator_saturation: f64,
    pub ipc_kp: Vec<f64>,
    pub ipc_ki: Vec<f64>,
    pub ipc_low_pass_frequency: f64,
    pub ipc_low_pass_damping: f64,
    pub alignment_error_set_point: f64,
    pub fast_low_pass_frequency: f64,
    pub slow_low_pass_frequency: f64,
    pub rate: f64,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct TowerForeAftDamping {
    // Integral gain. -1 is off.
    pub ki: f64,
    pub high_pass_corner_frequency: f64,
    pub integrator_saturation: f64,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct MinimumPitchSaturation {
    pub wind_speeds: Vec<f64>,
    pub min_pitch: Vec<f64>,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct Shutdown {
    pub max_pitch: f64,
    pub corner_frequency: f64,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct FlapActuation {
    pub angle: f64,
    pub kp: f64,
    pub ki: f64,
    pub max_pitch: f64,
}

/// Controller parameters grouped by the sections of the parameter file.
#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct ControllerParameters {
    pub flags: ControllerFlags,
    pub filters: Filters,
    pub pitch_control: PitchControl,
    pub individual_pitch_control: IndividualPitchControl,
    pub torque_control: TorqueControl,
    pub setpoint_smoother: SetpointSmoother,
    pub wind_speed_estimator: WindSpeedEstimator,
    pub yaw_control: YawControl,
    pub tower_fore_aft_damping: TowerForeAftDamping,
    pub minimum_pitch_saturation: MinimumPitchSaturation,
    pub shutdown: Shutdown,
    // Nacelle velocity feedback gain of the floating turbine in s.
    pub floating_kp: f64,
    pub flap_actuation: FlapActuation,
}

impl ControllerParameters {
    /// Create the controller parameters from a loaded configuration set.
    ///
    /// # Arguments
    /// * `configuration` - Configuration set.
    ///
    /// # Returns
    /// Controller parameters.
    ///
    /// # Errors
    /// Schema violation if a parameter is missing or has another type.
    pub fn from_configuration(configuration: &ConfigurationSet) -> Result<Self, LoadError> {
        let c = configuration;

        Ok(Self {
            flags: ControllerFlags {
                logging_level: c.get_mode("LoggingLevel")?,
                low_pass_filter_type: c.get_mode("F_LPFType")?,
                notch_filter_type: c.get_mode("F_NotchType")?,
                ipc_control_mode: c.get_mode("IPC_ControlMode")?,
                vs_control_mode: c.get_mode("VS_ControlMode")?,
                pc_control_mode: c.get_mode("PC_ControlMode")?,
                yaw_control_mode: c.get_mode("Y_ControlMode")?,
                setpoint_smoother_mode: c.get_mode("SS_Mode")?,
                wind_speed_estimator_mode: c.get_mode("WE_Mode")?,
                pitch_saturation_mode: c.get_mode("PS_Mode")?,
                shutdown_mode: c.get_mode("SD_Mode")?,
                floating_feedback_mode: c.get_mode("Fl_Mode")?,
                flap_control_mode: c.get_mode("Flp_Mode")?,
            },
            filters: Filters {
                low_pass_corner_frequency: c.get_parameter("F_LPFCornerFreq")?,
                low_pass_damping: c.get_parameter("F_LPFDamping")?,
                notch_corner_frequency: c.get_parameter("F_NotchCornerFreq")?,
                notch_beta_num_den: c.get_parameter("F_NotchBetaNumDen")?,
                setpoint_smoother_corner_frequency: c.get_parameter("F_SSCornerFreq")?,
                floating_corner_frequency: c.get_parameter("F_FlCornerFreq")?,
                flap_corner_frequency: c.get_parameter("F_FlpCornerFreq")?,
            },
            pitch_control: PitchControl {
                gain_schedule: GainSchedule {
                    angles: c.get_parameter("PC_GS_angles")?,
                    kp: c.get_parameter("PC_GS_KP")?,
                    ki: c.get_parameter("PC_GS_KI")?,
                    kd: c.get_parameter("PC_GS_KD")?,
                    tf: c.get_parameter("PC_GS_TF")?,
                },
                max_pitch: c.get_parameter("PC_MaxPit")?,
                min_pitch: c.get_parameter("PC_MinPit")?,
                max_rate: c.get_parameter("PC_MaxRat")?,
                min_rate: c.get_parameter("PC_MinRat")?,
                reference_speed: c.get_parameter("PC_RefSpd")?,
                fine_pitch: c.get_parameter("PC_FinePit")?,
                switch_angle: c.get_parameter("PC_Switch")?,
            },
            individual_pitch_control: IndividualPitchControl {
                integrator_saturation: c.get_parameter("IPC_IntSat")?,
                ki: c.get_parameter("IPC_KI")?,
                azimuth_offset: c.get_parameter("IPC_aziOffset")?,
                actuator_corner_frequency: c.get_parameter("IPC_CornerFreqAct")?,
            },
            torque_control: TorqueControl {
                generator_efficiency: c.get_parameter("VS_GenEff")?,
                above_rated_saturation_torque: c.get_parameter("VS_ArSatTq")?,
                max_rate: c.get_parameter("VS_MaxRat")?,
                max_torque: c.get_parameter("VS_MaxTq")?,
                min_torque: c.get_parameter("VS_MinTq")?,
                min_optimal_mode_speed: c.get_parameter("VS_MinOMSpd")?,
                region_2_constant: c.get_parameter("VS_Rgn2K")?,
                rated_power: c.get_parameter("VS_RtPwr")?,
                rated_torque: c.get_parameter("VS_RtTq")?,
                reference_speed: c.get_parameter("VS_RefSpd")?,
                kp: c.get_parameter("VS_KP")?,
                ki: c.get_parameter("VS_KI")?,
                optimal_tip_speed_ratio: c.get_parameter("VS_TSRopt")?,
            },
            setpoint_smoother: SetpointSmoother {
                torque_gain: c.get_parameter("SS_VSGain")?,
                pitch_gain: c.get_parameter("SS_PCGain")?,
            },
            wind_speed_estimator: WindSpeedEstimator {
                blade_radius: c.get_parameter("WE_BladeRadius")?,
                cp: c.get_parameter("WE_CP")?,
                gamma: c.get_parameter("WE_Gamma")?,
                gearbox_ratio: c.get_parameter("WE_GearboxRatio")?,
                total_inertia: c.get_parameter("WE_Jtot")?,
                air_density: c.get_parameter("WE_RhoAir")?,
                performance_filename: c.get_parameter("PerfFileName")?,
                performance_table_size: Self::read_performance_table_size(c)?,
                pole_wind_speeds: c.get_parameter("WE_FOPoles_v")?,
                poles: c.get_parameter("WE_FOPoles")?,
            },
            yaw_control: YawControl {
                error_threshold: c.get_parameter("Y_ErrThresh")?,
                ipc_integrator_saturation: c.get_parameter("Y_IPC_IntSat")?,
                ipc_kp: c.get_parameter("Y_IPC_KP")?,
                ipc_ki: c.get_parameter("Y_IPC_KI")?,
                ipc_low_pass_frequency: c.get_parameter("Y_IPC_omegaLP")?,
                ipc_low_pass_damping: c.get_parameter("Y_IPC_zetaLP")?,
                alignment_error_set_point: c.get_parameter("Y_MErrSet")?,
                fast_low_pass_frequency: c.get_parameter("Y_omegaLPFast")?,
                slow_low_pass_frequency: c.get_parameter("Y_omegaLPSlow")?,
                rate: c.get_parameter("Y_Rate")?,
            },
            tower_fore_aft_damping: TowerForeAftDamping {
                ki: c.get_parameter("FA_KI")?,
                high_pass_corner_frequency: c.get_parameter("FA_HPF_CornerFreq")?,
                integrator_saturation: c.get_parameter("FA_IntSat")?,
            },
            minimum_pitch_saturation: MinimumPitchSaturation {
                wind_speeds: c.get_parameter("PS_WindSpeeds")?,
                min_pitch: c.get_parameter("PS_BldPitchMin")?,
            },
            shutdown: Shutdown {
                max_pitch: c.get_parameter("SD_MaxPit")?,
                corner_frequency: c.get_parameter("SD_CornerFreq")?,
            },
            floating_kp: c.get_parameter("Fl_Kp")?,
            flap_actuation: FlapActuation {
                angle: c.get_parameter("Flp_Angle")?,
                kp: c.get_parameter("Flp_Kp")?,
                ki: c.get_parameter("Flp_Ki")?,
                max_pitch: c.get_parameter("Flp_MaxPit")?,
            },
        })
    }

    /// Read the size of the rotor performance tables.
    ///
    /// # Arguments
    /// * `configuration` - Configuration set.
    ///
    /// # Returns
    /// Number of the blade pitch angles and tip-speed ratios.
    fn read_performance_table_size(
        configuration: &ConfigurationSet,
    ) -> Result<(usize, usize), LoadError> {
        let name = "PerfTableSize";
        let size: Vec<usize> = configuration.get_parameter(name)?;

        match size[..] {
            [num_pitch, num_tsr] => Ok((num_pitch, num_tsr)),
            _ => Err(LoadError::schema_violation(
                name,
                format!("expected 2 values, found {}", size.len()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::EPSILON;
    use std::path::Path;

    fn create_parameters() -> ControllerParameters {
        let configuration = ConfigurationSet::from_file(Path::new("config/DISCON.IN")).unwrap();

        ControllerParameters::from_configuration(&configuration).unwrap()
    }

    #[test]
    fn test_flags() {
        let flags = create_parameters().flags;

        assert_eq!(flags.logging_level, LoggingLevel::Standard);
        assert_eq!(flags.low_pass_filter_type, LowPassFilterType::FirstOrder);
        assert_eq!(
            flags.vs_control_mode,
            VsControlMode::TsrTrackingConstantTorque
        );
        assert_eq!(
            flags.wind_speed_estimator_mode,
            WindSpeedEstimatorMode::ExtendedKalmanFilter
        );
        assert_eq!(
            flags.floating_feedback_mode,
            FloatingFeedbackMode::NacelleVelocity
        );
        assert_eq!(flags.flap_control_mode, FlapControlMode::Off);
    }

    #[test]
    fn test_pitch_control() {
        let pitch_control = create_parameters().pitch_control;

        assert_eq!(pitch_control.gain_schedule.len(), 30);
        assert!(!pitch_control.gain_schedule.is_empty());
        assert_eq!(pitch_control.gain_schedule.kp.len(), 30);
        assert_eq!(pitch_control.gain_schedule.tf.len(), 30);

        assert_relative_eq!(pitch_control.max_pitch, 1.5708, epsilon = EPSILON);
        assert_relative_eq!(pitch_control.min_rate, -0.1745, epsilon = EPSILON);
        assert!(pitch_control.max_pitch >= pitch_control.min_pitch);
    }

    #[test]
    fn test_filters() {
        let filters = create_parameters().filters;

        assert_eq!(filters.notch_beta_num_den, [0.0, 0.25]);
        assert_eq!(filters.floating_corner_frequency, [0.213, 1.0]);
    }

    #[test]
    fn test_torque_control() {
        let torque_control = create_parameters().torque_control;

        assert_relative_eq!(torque_control.rated_power, 5e6, epsilon = EPSILON);
        assert_eq!(torque_control.kp, vec![-9394.72748]);
        assert!(torque_control.min_torque <= torque_control.max_torque);
    }

    #[test]
    fn test_wind_speed_estimator() {
        let estimator = create_parameters().wind_speed_estimator;

        assert_eq!(estimator.performance_filename, "Cp_Ct_Cq.NREL5MW.txt");
        assert_eq!(estimator.performance_table_size, (104, 72));
        assert_eq!(estimator.pole_wind_speeds.len(), estimator.poles.len());
        assert_relative_eq!(estimator.air_density, 1.225, epsilon = EPSILON);
    }

    #[test]
    fn test_remaining_sections() {
        let parameters = create_parameters();

        assert_eq!(parameters.individual_pitch_control.ki, [0.0, 0.0]);
        assert_eq!(parameters.yaw_control.ipc_kp, vec![0.0]);
        assert_eq!(parameters.tower_fore_aft_damping.ki, -1.0);
        assert_eq!(
            parameters.minimum_pitch_saturation.wind_speeds.len(),
            parameters.minimum_pitch_saturation.min_pitch.len()
        );
        assert_relative_eq!(parameters.shutdown.max_pitch, 0.6981, epsilon = EPSILON);
        assert_relative_eq!(parameters.floating_kp, -9.31143, epsilon = EPSILON);
        assert_eq!(parameters.flap_actuation.kp, 0.0);
    }
}
