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

//! Fixed schema of the controller parameter file.
//!
//! The file format is not self-describing: the kind and the number of tokens
//! of each parameter come from this table, keyed by the canonical name.

use crate::enums::{
    FlapControlMode, FloatingFeedbackMode, IpcControlMode, LoggingLevel, LowPassFilterType,
    ModeFlag, NotchFilterType, PcControlMode, PitchSaturationMode, Section, SetpointSmootherMode,
    ShutdownMode, ValueKind, VsControlMode, WindSpeedEstimatorMode, YawControlMode,
};

/// Number of tokens of a parameter.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Arity {
    Fixed(usize),
    // Length is given by the named count field.
    CountedBy(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ParameterSpec {
    // Canonical name.
    pub name: &'static str,
    pub section: Section,
    pub kind: ValueKind,
    pub arity: Arity,
    // Allowed values of a mode flag.
    pub domain: Option<fn() -> Vec<i64>>,
    // Description used when a record has no comment of its own.
    pub description: &'static str,
}

impl ParameterSpec {
    /// The parameter is a table size that other arrays are counted by or not.
    pub fn is_count(&self) -> bool {
        SCHEMA
            .iter()
            .any(|spec| spec.arity == Arity::CountedBy(self.name))
    }

    /// The parameter is a mode flag or not.
    pub fn is_mode(&self) -> bool {
        self.domain.is_some()
    }
}

const fn spec(
    name: &'static str,
    section: Section,
    kind: ValueKind,
    arity: Arity,
    description: &'static str,
) -> ParameterSpec {
    ParameterSpec {
        name,
        section,
        kind,
        arity,
        domain: None,
        description,
    }
}

const fn scalar(name: &'static str, section: Section, description: &'static str) -> ParameterSpec {
    spec(name, section, ValueKind::Float, Arity::Fixed(1), description)
}

const fn pair(name: &'static str, section: Section, description: &'static str) -> ParameterSpec {
    spec(name, section, ValueKind::Float, Arity::Fixed(2), description)
}

const fn count(name: &'static str, section: Section, description: &'static str) -> ParameterSpec {
    spec(name, section, ValueKind::Integer, Arity::Fixed(1), description)
}

const fn table(
    name: &'static str,
    count_field: &'static str,
    section: Section,
    description: &'static str,
) -> ParameterSpec {
    spec(
        name,
        section,
        ValueKind::Float,
        Arity::CountedBy(count_field),
        description,
    )
}

const fn mode(
    name: &'static str,
    domain: fn() -> Vec<i64>,
    section: Section,
    description: &'static str,
) -> ParameterSpec {
    ParameterSpec {
        name,
        section,
        kind: ValueKind::Integer,
        arity: Arity::Fixed(1),
        domain: Some(domain),
        description,
    }
}

use Section::*;

/// All the parameters in the order of a written file.
#[rustfmt::skip]
pub static SCHEMA: &[ParameterSpec] = &[
    // Debug
    mode("LoggingLevel", LoggingLevel::domain, Debug,
        "{0: write no debug files, 1: write standard output .dbg-file, 2: write standard output .dbg-file and complete avrSWAP-array .dbg2-file}"),
    // Controller flags
    mode("F_LPFType", LowPassFilterType::domain, ControllerFlags,
        "{1: first-order low-pass filter, 2: second-order low-pass filter}, [rad/s] (currently filters generator speed and pitch control signals"),
    mode("F_NotchType", NotchFilterType::domain, ControllerFlags,
        "Notch on the measured generator speed and/or tower fore-aft motion (for floating) {0: disable, 1: generator speed, 2: tower-top fore-aft motion, 3: generator speed and tower-top fore-aft motion}"),
    mode("IPC_ControlMode", IpcControlMode::domain, ControllerFlags,
        "Turn Individual Pitch Control (IPC) for fatigue load reductions (pitch contribution) {0: off, 1: 1P reductions, 2: 1P+2P reductions}"),
    mode("VS_ControlMode", VsControlMode::domain, ControllerFlags,
        "Generator torque control mode in above rated conditions {0: constant torque, 1: constant power, 2: TSR tracking PI control with constant torque, 3: TSR tracking PI control with constant power}"),
    mode("PC_ControlMode", PcControlMode::domain, ControllerFlags,
        "Blade pitch control mode {0: No pitch, fix to fine pitch, 1: active PI blade pitch control}"),
    mode("Y_ControlMode", YawControlMode::domain, ControllerFlags,
        "Yaw control mode {0: no yaw control, 1: yaw rate control, 2: yaw-by-IPC}"),
    mode("SS_Mode", SetpointSmootherMode::domain, ControllerFlags,
        "Setpoint Smoother mode {0: no setpoint smoothing, 1: introduce setpoint smoothing}"),
    mode("WE_Mode", WindSpeedEstimatorMode::domain, ControllerFlags,
        "Wind speed estimator mode {0: One-second low pass filtered hub height wind speed, 1: Immersion and Invariance Estimator, 2: Extended Kalman Filter}"),
    mode("PS_Mode", PitchSaturationMode::domain, ControllerFlags,
        "Pitch saturation mode {0: no pitch saturation, 1: peak shaving, 2: Cp-maximizing pitch saturation, 3: peak shaving and Cp-maximizing pitch saturation}"),
    mode("SD_Mode", ShutdownMode::domain, ControllerFlags,
        "Shutdown mode {0: no shutdown procedure, 1: pitch to max pitch at shutdown}"),
    mode("Fl_Mode", FloatingFeedbackMode::domain, ControllerFlags,
        "Floating specific feedback mode {0: no nacelle velocity feedback, 1: nacelle velocity feedback}"),
    mode("Flp_Mode", FlapControlMode::domain, ControllerFlags,
        "Flap control mode {0: no flap control, 1: steady state flap angle, 2: Proportional flap control}"),
    // Filters
    scalar("F_LPFCornerFreq", Filters,
        "Corner frequency (-3dB point) in the low-pass filters, [rad/s]"),
    scalar("F_LPFDamping", Filters,
        "Damping coefficient [used only when F_FilterType = 2]"),
    scalar("F_NotchCornerFreq", Filters,
        "Natural frequency of the notch filter, [rad/s]"),
    pair("F_NotchBetaNumDen", Filters,
        "Two notch damping values (numerator and denominator, resp) - determines the width and depth of the notch, [-]"),
    scalar("F_SSCornerFreq", Filters,
        "Corner frequency (-3dB point) in the first order low pass filter for the setpoint smoother, [rad/s]."),
    pair("F_FlCornerFreq", Filters,
        "Natural frequency and damping in the second order low pass filter of the tower-top fore-aft motion for floating feedback control [rad/s, -]."),
    pair("F_FlpCornerFreq", Filters,
        "Corner frequency and damping in the second order low pass filter of the blade root bending moment for flap control [rad/s, -]."),
    // Blade pitch control
    count("PC_GS_n", BladePitchControl, "Amount of gain-scheduling table entries"),
    table("PC_GS_angles", "PC_GS_n", BladePitchControl,
        "Gain-schedule table: pitch angles"),
    table("PC_GS_KP", "PC_GS_n", BladePitchControl,
        "Gain-schedule table: pitch controller kp gains"),
    table("PC_GS_KI", "PC_GS_n", BladePitchControl,
        "Gain-schedule table: pitch controller ki gains"),
    table("PC_GS_KD", "PC_GS_n", BladePitchControl,
        "Gain-schedule table: pitch controller kd gains"),
    table("PC_GS_TF", "PC_GS_n", BladePitchControl,
        "Gain-schedule table: pitch controller tf gains (derivative filter)"),
    scalar("PC_MaxPit", BladePitchControl, "Maximum physical pitch limit, [rad]."),
    scalar("PC_MinPit", BladePitchControl, "Minimum physical pitch limit, [rad]."),
    scalar("PC_MaxRat", BladePitchControl,
        "Maximum pitch rate (in absolute value) in pitch controller, [rad/s]."),
    scalar("PC_MinRat", BladePitchControl,
        "Minimum pitch rate (in absolute value) in pitch controller, [rad/s]."),
    scalar("PC_RefSpd", BladePitchControl,
        "Desired (reference) HSS speed for pitch controller, [rad/s]."),
    scalar("PC_FinePit", BladePitchControl,
        "Record 5: Below-rated pitch angle set-point, [rad]"),
    scalar("PC_Switch", BladePitchControl,
        "Angle above lowest minimum pitch angle for switch, [rad]"),
    // Individual pitch control
    scalar("IPC_IntSat", IndividualPitchControl,
        "Integrator saturation (maximum signal amplitude contribution to pitch from IPC), [rad]"),
    pair("IPC_KI", IndividualPitchControl,
        "Integral gain for the individual pitch controller: first parameter for 1P reductions, second for 2P reductions, [-]"),
    pair("IPC_aziOffset", IndividualPitchControl,
        "Phase offset added to the azimuth angle for the individual pitch controller, [rad]."),
    scalar("IPC_CornerFreqAct", IndividualPitchControl,
        "Corner frequency of the first-order actuators model, to induce a phase lag in the IPC signal {0: Disable}, [rad/s]"),
    // Torque control
    scalar("VS_GenEff", TorqueControl,
        "Generator efficiency mechanical power -> electrical power, [should match the efficiency defined in the generator properties!], [%]"),
    scalar("VS_ArSatTq", TorqueControl,
        "Above rated generator torque PI control saturation, [Nm]"),
    scalar("VS_MaxRat", TorqueControl,
        "Maximum torque rate (in absolute value) in torque controller, [Nm/s]."),
    scalar("VS_MaxTq", TorqueControl,
        "Maximum generator torque in Region 3 (HSS side), [Nm]."),
    scalar("VS_MinTq", TorqueControl, "Minimum generator (HSS side), [Nm]."),
    scalar("VS_MinOMSpd", TorqueControl,
        "Optimal mode minimum speed, cut-in speed towards optimal mode gain path, [rad/s]"),
    scalar("VS_Rgn2K", TorqueControl,
        "Generator torque constant in Region 2 (HSS side), [Nm/(rad/s)^2]"),
    scalar("VS_RtPwr", TorqueControl, "Wind turbine rated power [W]"),
    scalar("VS_RtTq", TorqueControl, "Rated torque, [Nm]."),
    scalar("VS_RefSpd", TorqueControl, "Rated generator speed [rad/s]"),
    count("VS_n", TorqueControl, "Number of generator PI torque controller gains"),
    table("VS_KP", "VS_n", TorqueControl,
        "Proportional gain for generator PI torque controller [1/(rad/s) Nm]. (Only used in the transitional 2.5 region if VS_ControlMode =/ 2)"),
    table("VS_KI", "VS_n", TorqueControl,
        "Integral gain for generator PI torque controller [1/rad Nm]. (Only used in the transitional 2.5 region if VS_ControlMode =/ 2)"),
    scalar("VS_TSRopt", TorqueControl, "Power-maximizing region 2 tip-speed-ratio [rad]."),
    // Setpoint smoother
    scalar("SS_VSGain", SetpointSmoother,
        "Variable speed torque controller setpoint smoother gain, [-]."),
    scalar("SS_PCGain", SetpointSmoother,
        "Collective pitch controller setpoint smoother gain, [-]."),
    // Wind speed estimator
    scalar("WE_BladeRadius", WindSpeedEstimator,
        "Blade length (distance from hub center to blade tip), [m]"),
    count("WE_CP_n", WindSpeedEstimator, "Amount of parameters in the Cp array"),
    table("WE_CP", "WE_CP_n", WindSpeedEstimator,
        "Parameters that define the parameterized CP(lambda) function"),
    scalar("WE_Gamma", WindSpeedEstimator,
        "Adaption gain of the wind speed estimator algorithm [m/rad]"),
    scalar("WE_GearboxRatio", WindSpeedEstimator, "Gearbox ratio [>=1],  [-]"),
    scalar("WE_Jtot", WindSpeedEstimator,
        "Total drivetrain inertia, including blades, hub and casted generator inertia to LSS, [kg m^2]"),
    scalar("WE_RhoAir", WindSpeedEstimator, "Air density, [kg m^-3]"),
    spec("PerfFileName", WindSpeedEstimator, ValueKind::Text, Arity::Fixed(1),
        "File containing rotor performance tables (Cp,Ct,Cq)"),
    spec("PerfTableSize", WindSpeedEstimator, ValueKind::Integer, Arity::Fixed(2),
        "Size of rotor performance tables, first number refers to number of blade pitch angles, second number referse to number of tipspeed ratios"),
    count("WE_FOPoles_N", WindSpeedEstimator,
        "Number of first-order system poles used in EKF"),
    table("WE_FOPoles_v", "WE_FOPoles_N", WindSpeedEstimator,
        "Wind speeds corresponding to first-order system poles [m/s]"),
    table("WE_FOPoles", "WE_FOPoles_N", WindSpeedEstimator, "First order system poles"),
    // Yaw control
    scalar("Y_ErrThresh", YawControl,
        "Yaw error threshold. Turbine begins to yaw when it passes this. [rad^2 s]"),
    scalar("Y_IPC_IntSat", YawControl,
        "Integrator saturation (maximum signal amplitude contribution to pitch from yaw-by-IPC), [rad]"),
    count("Y_IPC_n", YawControl, "Number of controller gains (yaw-by-IPC)"),
    table("Y_IPC_KP", "Y_IPC_n", YawControl, "Yaw-by-IPC proportional controller gain Kp"),
    table("Y_IPC_KI", "Y_IPC_n", YawControl, "Yaw-by-IPC integral controller gain Ki"),
    scalar("Y_IPC_omegaLP", YawControl,
        "Low-pass filter corner frequency for the Yaw-by-IPC controller to filtering the yaw alignment error, [rad/s]."),
    scalar("Y_IPC_zetaLP", YawControl,
        "Low-pass filter damping factor for the Yaw-by-IPC controller to filtering the yaw alignment error, [-]."),
    scalar("Y_MErrSet", YawControl, "Yaw alignment error, set point [rad]"),
    scalar("Y_omegaLPFast", YawControl, "Corner frequency fast low pass filter, 1.0 [Hz]"),
    scalar("Y_omegaLPSlow", YawControl, "Corner frequency slow low pass filter, 1/60 [Hz]"),
    scalar("Y_Rate", YawControl, "Yaw rate [rad/s]"),
    // Tower fore-aft damping
    scalar("FA_KI", TowerForeAftDamping,
        "Integral gain for the fore-aft tower damper controller, -1 = off / >0 = on [rad s/m]"),
    scalar("FA_HPF_CornerFreq", TowerForeAftDamping,
        "Corner frequency (-3dB point) in the high-pass filter on the fore-aft acceleration signal [rad/s]"),
    scalar("FA_IntSat", TowerForeAftDamping,
        "Integrator saturation (maximum signal amplitude contribution to pitch from FA damper), [rad]"),
    // Minimum pitch saturation
    count("PS_BldPitchMin_N", MinimumPitchSaturation,
        "Number of values in minimum blade pitch lookup table (should equal number of values in PS_WindSpeeds and PS_BldPitchMin)"),
    table("PS_WindSpeeds", "PS_BldPitchMin_N", MinimumPitchSaturation,
        "Wind speeds corresponding to minimum blade pitch angles [m/s]"),
    table("PS_BldPitchMin", "PS_BldPitchMin_N", MinimumPitchSaturation,
        "Minimum blade pitch angles [rad]"),
    // Shutdown
    scalar("SD_MaxPit", Shutdown, "Maximum blade pitch angle to initiate shutdown, [rad]"),
    scalar("SD_CornerFreq", Shutdown,
        "Cutoff Frequency for first order low-pass filter for blade pitch angle, [rad/s]"),
    // Floating
    scalar("Fl_Kp", Floating, "Nacelle velocity proportional feedback gain [s]"),
    // Flap actuation
    scalar("Flp_Angle", FlapActuation, "Initial or steady state flap angle [rad]"),
    scalar("Flp_Kp", FlapActuation,
        "Blade root bending moment proportional gain for flap control [s]"),
    scalar("Flp_Ki", FlapActuation, "Flap displacement integral gain for flap control [s]"),
    scalar("Flp_MaxPit", FlapActuation, "Maximum (and minimum) flap pitch angle [rad]"),
];

/// Find the definition of a parameter.
///
/// # Arguments
/// * `name` - Canonical name of the parameter.
///
/// # Returns
/// Definition. None if the name is not in the schema.
pub fn find(name: &str) -> Option<&'static ParameterSpec> {
    SCHEMA.iter().find(|spec| spec.name == name)
}

/// Get the arrays whose length is given by the count field.
///
/// # Arguments
/// * `count_field` - Name of the count field.
///
/// # Returns
/// Specifications of the paired arrays.
pub fn paired_arrays(count_field: &str) -> Vec<&'static ParameterSpec> {
    SCHEMA
        .iter()
        .filter(|spec| matches!(spec.arity, Arity::CountedBy(name) if name == count_field))
        .collect()
}

/// Get the parameters of a section.
///
/// # Arguments
/// * `section` - Section.
///
/// # Returns
/// Specifications in the written order.
pub fn parameters_in(section: Section) -> Vec<&'static ParameterSpec> {
    SCHEMA
        .iter()
        .filter(|parameter| parameter.section == section)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_schema_names_are_unique() {
        let names: HashSet<&str> = SCHEMA.iter().map(|spec| spec.name).collect();

        assert_eq!(names.len(), SCHEMA.len());
        assert_eq!(SCHEMA.len(), 89);
    }

    #[test]
    fn test_counted_arrays_refer_to_count_fields() {
        for spec in SCHEMA {
            if let Arity::CountedBy(count_field) = spec.arity {
                let count = find(count_field).unwrap();

                assert_eq!(count.kind, ValueKind::Integer);
                assert_eq!(count.arity, Arity::Fixed(1));
                assert!(count.is_count());
            }
        }
    }

    #[test]
    fn test_find() {
        let spec = find("PerfTableSize").unwrap();
        assert_eq!(spec.kind, ValueKind::Integer);
        assert_eq!(spec.arity, Arity::Fixed(2));
        assert!(!spec.is_count());

        assert_eq!(find("PerfFileName").unwrap().kind, ValueKind::Text);

        assert!(find("pc_gs_kp").is_none());
        assert!(find("Unknown").is_none());
    }

    #[test]
    fn test_is_mode() {
        assert!(find("VS_ControlMode").unwrap().is_mode());
        assert!(!find("VS_n").unwrap().is_mode());
        assert!(!find("PC_MaxPit").unwrap().is_mode());

        let domain = find("VS_ControlMode").unwrap().domain.unwrap();
        assert_eq!(domain(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_paired_arrays() {
        let names: Vec<&str> = paired_arrays("PC_GS_n")
            .iter()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(
            names,
            vec!["PC_GS_angles", "PC_GS_KP", "PC_GS_KI", "PC_GS_KD", "PC_GS_TF"]
        );

        assert_eq!(paired_arrays("WE_FOPoles_N").len(), 2);
        assert!(paired_arrays("PC_MaxPit").is_empty());
    }

    #[test]
    fn test_paired_arrays_borrowed_name() {
        // Names read from a file are not static.
        let count_field = String::from("VS_n");

        let names: Vec<&str> = paired_arrays(&count_field)
            .iter()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(names, vec!["VS_KP", "VS_KI"]);
    }

    #[test]
    fn test_parameters_in() {
        let total: usize = Section::iter()
            .map(|section| parameters_in(section).len())
            .sum();
        assert_eq!(total, SCHEMA.len());

        assert_eq!(parameters_in(Section::ControllerFlags).len(), 12);
        assert_eq!(parameters_in(Section::Floating).len(), 1);
    }

    #[test]
    fn test_sections_are_contiguous() {
        let mut sections = Vec::new();
        for spec in SCHEMA {
            if sections.last() != Some(&spec.section) {
                sections.push(spec.section);
            }
        }

        assert_eq!(sections, Section::iter().collect::<Vec<Section>>());
    }
}
