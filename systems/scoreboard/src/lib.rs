#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Display-support system that folds score and currency events into the two
//! numeric sinks the HUD renders.

use lane_defence_core::Event;

/// Latest display values published by the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreboardView {
    /// Score total to display.
    pub score: u32,
    /// Currency balance to display.
    pub currency: u32,
}

/// Pure system that tracks the values the display collaborator should show.
///
/// The world emits `ScoreChanged` / `CurrencyChanged` synchronously with
/// every mutation that affects them, so folding the event stream keeps the
/// displayed values exact without re-querying world state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scoreboard {
    view: ScoreboardView,
}

impl Scoreboard {
    /// Creates a new scoreboard with zeroed display values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            view: ScoreboardView {
                score: 0,
                currency: 0,
            },
        }
    }

    /// Consumes world events, updating the published display values.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::ScoreChanged { score } => self.view.score = *score,
                Event::CurrencyChanged { currency } => self.view.currency = *currency,
                _ => {}
            }
        }
    }

    /// Latest values the display should show.
    #[must_use]
    pub const fn view(&self) -> ScoreboardView {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_the_latest_published_values() {
        let mut scoreboard = Scoreboard::new();
        scoreboard.handle(&[
            Event::ScoreChanged { score: 10 },
            Event::CurrencyChanged { currency: 100 },
            Event::ScoreChanged { score: 20 },
        ]);

        assert_eq!(
            scoreboard.view(),
            ScoreboardView {
                score: 20,
                currency: 100,
            },
        );
    }

    #[test]
    fn unrelated_events_leave_the_view_untouched() {
        let mut scoreboard = Scoreboard::new();
        scoreboard.handle(&[Event::SessionStarted]);
        assert_eq!(scoreboard.view(), ScoreboardView::default());
    }
}
