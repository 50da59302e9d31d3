#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchBoxId(pub u32);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorMessage {
    DebounceElapsed { box_id: SearchBoxId, generation: u64 },
}
