// Copyright (c) 2023 Espresso Systems (espressosys.com)
// This file is part of the Superform v2 contract bindings.
//
// This program is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Raise incidents for changes to the configuration of monitored yield source oracles.

pub mod config;
pub mod incident;
pub mod monitor;
pub mod notify;

pub use config::{MonitorConfig, MonitoredOracles, Networks};
pub use incident::{classify, EventContext, Incident, Severity};
pub use monitor::{Monitor, Options};
pub use notify::{LogNotifier, Notifier, WebhookNotifier};
