mod helpers;
mod record;
mod settings;

pub(crate) use record::{cmd_history, cmd_log, cmd_show};
pub(crate) use settings::{cmd_height_set, cmd_height_show, cmd_unit_set, cmd_unit_show};
