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

//! # DISCON Controller Parameters
//!
//! This library loads and validates the parameter file
//! (DISCON.IN) of a wind turbine controller. The loaded parameters are an
//! immutable [`config::ConfigurationSet`] that the controller reads by name.
pub mod application;
pub mod compare;
pub mod config;
pub mod constants;
pub mod controller_parameters;
pub mod enums;
pub mod error;
pub mod format;
pub mod loader;
pub mod record;
pub mod schema;
pub mod settings;
pub mod utility;
pub mod validator;
