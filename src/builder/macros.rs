//! Macros for terse machine declarations.

/// Build an `event => target` table for [`State::transitions`](crate::State::transitions).
///
/// # Example
///
/// ```
/// use barebone_fsm::{transitions, Machine};
///
/// let mut machine = Machine::new();
/// machine.state("parked", |s| {
///     s.transitions(transitions! {
///         "start" => "running",
///         "open" => "open",
///     });
/// });
///
/// assert_eq!(machine.describe(), "Machine: {>parked: [start, open]}");
/// ```
#[macro_export]
macro_rules! transitions {
    ($($event:expr => $target:expr),* $(,)?) => {
        ::std::vec![
            $(($crate::Name::from($event), $crate::Name::from($target))),*
        ]
    };
}
