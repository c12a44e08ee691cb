use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StudyError;
use crate::store::{PersistentSlots, Slot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

pub struct Preferences {
    slots: Arc<PersistentSlots>,
    theme: Theme,
}

impl Preferences {
    pub fn load(slots: Arc<PersistentSlots>) -> Self {
        let theme = slots.read(Slot::Theme, Theme::default());
        Self { slots, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StudyError> {
        info!("Setting theme: {:?}", theme);
        self.slots.write(Slot::Theme, &theme)?;
        self.theme = theme;
        Ok(())
    }
}
