use crate::{error::TintmixResult, frame::FrameRgba, session::Composer};

/// One state change, as a surface would issue it.
///
/// Commands are plain serializable data so a UI layer can hold nothing but
/// opaque values and indices.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddFilter { name: String },
    SetIntensity { index: usize, value: f32 },
    RemoveFilter { index: usize },
    Combine,
    SaveFilter { name: String },
    Reset,
}

/// What a dispatched command hands back to the surface that issued it.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandOutcome {
    /// The active list changed; carries the freshly rendered frame, `None`
    /// while no source is loaded.
    Rendered(Option<FrameRgba>),
    /// A blend was stored in the registry under `name`; pixels and the
    /// active list are unchanged, so nothing was re-rendered.
    Saved { name: String },
}

impl Composer {
    /// Apply one command, re-rendering whenever the change affects pixels.
    pub fn dispatch(&mut self, command: Command) -> TintmixResult<CommandOutcome> {
        match command {
            Command::AddFilter { name } => {
                self.add_filter(&name)?;
                Ok(CommandOutcome::Rendered(self.render()))
            }
            Command::SetIntensity { index, value } => {
                self.set_intensity(index, value)?;
                Ok(CommandOutcome::Rendered(self.render()))
            }
            Command::RemoveFilter { index } => {
                self.remove_filter(index)?;
                Ok(CommandOutcome::Rendered(self.render()))
            }
            Command::Combine => {
                self.combine()?;
                Ok(CommandOutcome::Rendered(self.render()))
            }
            Command::SaveFilter { name } => {
                self.save_as_filter(&name)?;
                Ok(CommandOutcome::Saved { name })
            }
            Command::Reset => {
                self.reset();
                Ok(CommandOutcome::Rendered(self.render()))
            }
        }
    }
}
