use crate::workflow::config::ControlSettings;
use powercore::figure::FigureModel;
use serde::{Deserialize, Serialize};

/// Latest render served to the GUI: the figure description, the settings
/// that produced it, and recent host activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub figure: Option<FigureModel>,
    pub settings: Option<ControlSettings>,
    pub activity: Vec<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }
}
