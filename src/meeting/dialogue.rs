use super::*;
use crate::*;

const PROPOSAL_FORMAT: &str =
    "IMPORTANT: Reply with exactly one line in the form:\n  Proposed-Date: <slot>\nand nothing else on that line.";
const SEPARATOR: &str = "############################";

impl Meeting {
    /// Scheduling letter between this seat and the next one.
    fn letter(&self, seat: Seat, history: &History<Slot>, advice: Option<Slot>) -> Vec<String> {
        let mut lines = vec![String::from("Times Available:")];
        lines.extend(self.calendar().slots().map(|slot| {
            let open = if history.contains(&slot) { 0 } else { 1 };
            format!("{}: {}", self.calendar().label(slot), open)
        }));
        lines.push(String::from("Day Valuations:"));
        lines.extend(
            self.calendar()
                .slots()
                .map(|slot| format!("{}: {}", self.calendar().label(slot), self.valuation(seat, slot))),
        );
        if let Some(slot) = advice {
            lines.push(format!("{}{}", ACTION, self.calendar().label(slot)));
        }
        lines.push(String::from(SEPARATOR));
        lines.push(String::from("Schedule Proposal Message:"));
        lines.push(format!("from: {}", self.name(seat)));
        lines.push(format!("to: {}", self.name(seat.next(self.seats()))));
        lines.push(String::from(SEPARATOR));
        lines
    }

    /// Own availability and valuations only.
    fn private(&self, seat: Seat, history: &History<Slot>, advice: Option<Slot>) -> Vec<String> {
        let mut lines = self.transcript(history);
        lines.push(String::from("\nYour availability:"));
        lines.extend(self.calendar().slots().map(|slot| {
            let open = if history.contains(&slot) { "No" } else { "Yes" };
            format!("  {}: {}", self.calendar().label(slot), open)
        }));
        lines.push(String::from("\nYour valuations:"));
        lines.extend(
            self.calendar()
                .slots()
                .map(|slot| format!("  {}: {}", self.calendar().label(slot), self.valuation(seat, slot))),
        );
        lines.extend(self.guidance(advice));
        lines.push(format!("\n{}", PROPOSAL_FORMAT));
        lines
    }

    /// Everybody's availability and top valuations.
    fn public(&self, seat: Seat, history: &History<Slot>, advice: Option<Slot>) -> Vec<String> {
        let mut lines = self.transcript(history);
        lines.push(String::from("\nPublic availability:"));
        lines.extend(Seat::all(self.seats()).map(|seat| {
            let slots = self
                .availability(seat)
                .iter()
                .map(|slot| self.calendar().label(*slot))
                .collect::<Vec<_>>()
                .join(", ");
            format!("  {}: {}", seat, slots)
        }));
        lines.push(String::from("\nPublic valuations:"));
        lines.extend(Seat::all(self.seats()).map(|seat| {
            let top = self
                .favorites(seat)
                .into_iter()
                .take(PUBLIC_VALUATIONS_SHOWN)
                .map(|(slot, value)| format!("{}({})", self.calendar().label(slot), value))
                .collect::<Vec<_>>()
                .join(", ");
            format!("  {}: {}", seat, top)
        }));
        lines.push(format!("\n{}{}.", IDENTITY, seat));
        lines.extend(self.guidance(advice));
        lines.push(format!("\n{}", PROPOSAL_FORMAT));
        lines
    }

    /// Valued slots, best first, ties in calendar order.
    fn favorites(&self, seat: Seat) -> Vec<(Slot, Utility)> {
        let mut valued = self.attendees()[seat.index()]
            .valuations
            .iter()
            .map(|(slot, value)| (*slot, *value))
            .collect::<Vec<_>>();
        valued.sort_by(|(_, a), (_, b)| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        valued
    }

    fn transcript(&self, history: &History<Slot>) -> Vec<String> {
        std::iter::once(String::from("History:"))
            .chain(
                history
                    .moves()
                    .iter()
                    .map(|(seat, slot)| format!("  {} proposed {}", seat, self.calendar().label(*slot))),
            )
            .collect()
    }

    fn guidance(&self, advice: Option<Slot>) -> Option<String> {
        advice.map(|slot| format!("\n{}{}", GUIDANCE, self.calendar().label(slot)))
    }
}

impl Dialogue for Meeting {
    fn prompt(&self, seat: Seat, history: &History<Self::E>, advice: &[Self::E]) -> Prompt {
        let advice = advice.first().copied();
        let lines = match self.protocol() {
            Protocol::Letter => self.letter(seat, history, advice),
            Protocol::Private => self.private(seat, history, advice),
            Protocol::Public => self.public(seat, history, advice),
        };
        Prompt {
            system: String::from("You are a strategic meeting assistant."),
            user: lines.join("\n"),
        }
    }

    fn parse(&self, reply: &str) -> Result<Self::E, ReplyError> {
        match self.protocol() {
            Protocol::Letter => self.calendar().mention(reply).ok_or(ReplyError::NoSlotMentioned),
            Protocol::Private | Protocol::Public => {
                let proposal = reply
                    .lines()
                    .find_map(|line| after(line.trim(), PROPOSAL))
                    .ok_or(ReplyError::MissingProposal)?;
                self.calendar()
                    .find(proposal)
                    .ok_or_else(|| ReplyError::UnknownSlot(proposal.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friday() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
    }

    #[test]
    fn letter_prompt() {
        let game = Scenario::classic().build().unwrap();
        let history = History::from(vec![(Seat::from(0), Slot::from(0))]);
        let prompt = game.prompt(Seat::from(1), &history, &[Slot::from(2)]);
        assert_eq!(prompt.system, "You are a strategic meeting assistant.");
        assert_eq!(
            prompt.user,
            [
                "Times Available:",
                "Mon: 0",
                "Tue: 1",
                "Wed: 1",
                "Day Valuations:",
                "Mon: 0",
                "Tue: 4",
                "Wed: 2",
                "Action: Propose Wed",
                SEPARATOR,
                "Schedule Proposal Message:",
                "from: Suzy",
                "to: Bob",
                SEPARATOR,
            ]
            .join("\n")
        );
    }

    #[test]
    fn letter_replies_mention_a_day() {
        let game = Scenario::classic().build().unwrap();
        assert_eq!(game.parse("Dear Bob, shall we say wed?"), Ok(Slot::from(2)));
        assert_eq!(game.parse("Sorry, I cannot."), Err(ReplyError::NoSlotMentioned));
    }

    #[test]
    fn private_prompt() {
        let game = Scenario::conference(friday()).build().unwrap();
        let history = History::from(vec![(Seat::from(0), Slot::from(4))]);
        let prompt = game.prompt(Seat::from(1), &history, &[Slot::from(4)]);
        assert!(prompt.user.starts_with("History:\n  Player 1 proposed Mon 2024-06-03 13:00-14:00\n\nYour availability:\n"));
        assert!(prompt.user.contains("  Mon 2024-06-03 13:00-14:00: No\n"));
        assert!(prompt.user.contains("  Mon 2024-06-03 14:00-15:00: Yes\n"));
        assert!(prompt.user.contains("\nYour valuations:\n  Mon 2024-06-03 09:00-10:00: 3\n"));
        assert!(prompt.user.contains("\n\nSolver guidance: propose Mon 2024-06-03 13:00-14:00\n"));
        assert!(prompt.user.ends_with("  Proposed-Date: <slot>\nand nothing else on that line."));
    }

    #[test]
    fn public_prompt() {
        let game = Scenario::perfect(friday()).build().unwrap();
        let prompt = game.prompt(Seat::from(0), &History::default(), &[]);
        assert!(prompt.user.starts_with("History:\n\nPublic availability:\n  Player 1: Mon 2024-06-03 09:00-10:00, "));
        assert!(prompt.user.contains(
            "\nPublic valuations:\n  Player 1: Mon 2024-06-03 12:00-13:00(5), Tue 2024-06-04 09:00-10:00(5), Tue 2024-06-04 14:00-15:00(5)\n"
        ));
        assert!(prompt.user.contains("\n\nYou are Player 1.\n\nIMPORTANT"));
        assert!(!prompt.user.contains("Solver guidance"));
        let prompt = game.prompt(Seat::from(2), &History::default(), &[Slot::from(20)]);
        assert!(prompt.user.contains("\n\nYou are Player 3.\n\nSolver guidance: propose "));
    }

    #[test]
    fn public_valuations_show_top_three() {
        let game = Scenario::perfect(friday()).build().unwrap();
        let top = game.favorites(Seat::from(0));
        assert_eq!(top[0], (Slot::from(3), 5.));
        assert_eq!(top[1], (Slot::from(8), 5.));
        assert_eq!(top[2], (Slot::from(13), 5.));
    }

    #[test]
    fn proposal_replies() {
        let game = Scenario::conference(friday()).build().unwrap();
        assert_eq!(
            game.parse("Thinking...\nProposed-Date: Mon 2024-06-03 10:00-11:00\n"),
            Ok(Slot::from(1))
        );
        assert_eq!(game.parse("I propose Monday"), Err(ReplyError::MissingProposal));
        assert_eq!(
            game.parse("Proposed-Date: Sat 2024-06-08 10:00-11:00"),
            Err(ReplyError::UnknownSlot(String::from("Sat 2024-06-08 10:00-11:00")))
        );
    }
}
