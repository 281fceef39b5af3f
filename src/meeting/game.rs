use super::*;
use crate::*;
use std::collections::BTreeMap;
use std::collections::BTreeSet;

/// Prompt format presented to chat-model seats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// Two-party scheduling letter with a suggested action.
    Letter,
    /// Own availability and valuations only.
    #[default]
    Private,
    /// Every seat's availability and top valuations are common knowledge.
    Public,
}

/// One participant of a meeting.
#[derive(Debug, Clone, PartialEq)]
pub struct Attendee {
    pub name: String,
    pub availability: Vec<Slot>,
    pub valuations: BTreeMap<Slot, Utility>,
}

/// Round-robin slot proposals until the last full cycle agrees.
///
/// Every seat proposes once per round. The game ends on consensus, which is
/// the last `seats` proposals naming the same slot, or after `rounds` full
/// rounds. Agreement pays each seat its valuation of the slot plus the
/// unanimous bonus; anything else pays nothing.
#[derive(Debug, Clone)]
pub struct Meeting {
    calendar: Calendar,
    attendees: Vec<Attendee>,
    rounds: usize,
    bonus: Utility,
    protocol: Protocol,
}

impl Meeting {
    pub fn new(
        calendar: Calendar,
        attendees: Vec<Attendee>,
        rounds: usize,
        bonus: Utility,
        protocol: Protocol,
    ) -> anyhow::Result<Self> {
        anyhow::ensure!(attendees.len() >= 2, "a meeting needs at least two seats");
        anyhow::ensure!(rounds >= 1, "a meeting needs at least one round");
        let labels = calendar
            .labels()
            .iter()
            .map(|label| label.to_lowercase())
            .collect::<BTreeSet<_>>();
        anyhow::ensure!(labels.len() == calendar.len(), "calendar labels must be unique");
        for attendee in attendees.iter() {
            anyhow::ensure!(!attendee.availability.is_empty(), "{} has no available slot", attendee.name);
            let unique = attendee.availability.iter().collect::<BTreeSet<_>>();
            anyhow::ensure!(unique.len() == attendee.availability.len(), "{} lists a slot twice", attendee.name);
            for slot in attendee.availability.iter().chain(attendee.valuations.keys()) {
                anyhow::ensure!(calendar.contains(*slot), "{} names slot {} outside the calendar", attendee.name, slot);
            }
        }
        Ok(Self {
            calendar,
            attendees,
            rounds,
            bonus,
            protocol,
        })
    }
    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }
    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }
    pub fn rounds(&self) -> usize {
        self.rounds
    }
    pub fn bonus(&self) -> Utility {
        self.bonus
    }
    pub fn name(&self, seat: Seat) -> &str {
        self.attendees[seat.index()].name.as_str()
    }
    pub fn availability(&self, seat: Seat) -> &[Slot] {
        &self.attendees[seat.index()].availability
    }
    /// A seat's value for a slot; unlisted slots are worth nothing.
    pub fn valuation(&self, seat: Seat, slot: Slot) -> Utility {
        self.attendees[seat.index()]
            .valuations
            .get(&slot)
            .copied()
            .unwrap_or(0.)
    }
    pub fn max_proposals(&self) -> usize {
        self.rounds * self.attendees.len()
    }
}

impl Game for Meeting {
    type E = Slot;
    fn seats(&self) -> usize {
        self.attendees.len()
    }
    fn choices(&self, seat: Seat) -> Vec<Self::E> {
        self.availability(seat).to_vec()
    }
    fn is_terminal(&self, history: &History<Self::E>) -> bool {
        self.consensus(history).is_some() || history.len() >= self.max_proposals()
    }
    fn payoff(&self, history: &History<Self::E>) -> Payoff {
        match self.consensus(history) {
            Some(slot) => Seat::all(self.seats())
                .map(|seat| self.valuation(seat, slot) + self.bonus)
                .collect(),
            None => vec![0.; self.seats()],
        }
    }
    fn negotiates(&self) -> bool {
        true
    }
    fn consensus(&self, history: &History<Self::E>) -> Option<Self::E> {
        let seats = self.seats();
        if history.len() < seats {
            return None;
        }
        let cycle = history.tail(seats);
        let (_, first) = cycle[0];
        cycle.iter().all(|(_, slot)| *slot == first).then_some(first)
    }
    fn label(&self, slot: &Self::E) -> String {
        self.calendar.label(*slot).to_string()
    }
}
