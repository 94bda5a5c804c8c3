//! View-model core for the job console: data services, list panel state,
//! settings and the controller that binds them.

pub mod controller;
pub mod error;
pub mod list;
pub mod search;
pub mod services;
pub mod settings;

pub use controller::{AppController, SelectJobRequest};
pub use error::{ClientError, SelectionError, SettingsError};
pub use list::{ListService, SidenavListService};
pub use search::MatchPolicy;
pub use services::{
    DataServices, JobsDataService, ProcessorsDataService, RestDataClient, StaticDataService,
    TopicsDataService,
};
pub use settings::{load_settings, Settings};
