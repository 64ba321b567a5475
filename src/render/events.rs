/// Events emitted by the control loop that renderers can handle
#[derive(Debug, Clone)]
pub enum RenderEvent {
    /// The loop started
    Started,

    /// A tick ran; carries the beat it ran with
    Tick(u64),

    /// The operator asked to leave
    Stopped,
}
