use crate::events::EngineEvent;

/// Last-value-wins publish point for the current theme/accent id.
///
/// Both the zone-driven path and the scare sequencer write through here;
/// only the orchestrator calls it, which keeps the single-writer discipline.
#[derive(Debug, Default)]
pub struct ThemeBroadcaster {
    current: Option<String>,
}

impl ThemeBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, theme: &str, out: &mut Vec<EngineEvent>) {
        if self.current.as_deref() == Some(theme) {
            return;
        }
        self.current = Some(theme.to_string());
        out.push(EngineEvent::ThemeChanged(theme.to_string()));
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}
