/// Per-run state shared by screens. Nothing here outlives the process.
pub trait SessionStore {
    fn intro_seen(&self) -> bool;
    fn mark_intro_seen(&mut self);
    fn clear_intro(&mut self);
}

#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    intro_seen: bool,
}

impl SessionStore for MemorySession {
    fn intro_seen(&self) -> bool {
        self.intro_seen
    }

    fn mark_intro_seen(&mut self) {
        log::debug!("intro marked as seen for this session");
        self.intro_seen = true;
    }

    fn clear_intro(&mut self) {
        self.intro_seen = false;
    }
}
