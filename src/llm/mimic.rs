use crate::*;

/// Offline oracle that plays whatever the prompt already suggests.
///
/// It answers in the reply format each prompt asks for: a proposal line
/// for solver guidance, a letter for suggested actions, and a decision
/// line for matrix games. Without guidance it seconds the latest proposal
/// in the prompt's history, and on an empty history it opens with its
/// best-valued open slot, or its first public slot when valuations are
/// not its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mimic;

impl Mimic {
    fn reply(prompt: &str) -> Option<String> {
        let lines = prompt.lines().map(str::trim).collect::<Vec<_>>();
        if let Some(slot) = lines.iter().find_map(|l| l.strip_prefix(GUIDANCE)) {
            return Some(format!("{} {}\nFollowing the solver guidance.", PROPOSAL, slot));
        }
        if let Some(slot) = lines.iter().find_map(|l| l.strip_prefix(ACTION)) {
            let to = lines.iter().find_map(|l| l.strip_prefix("to: ")).unwrap_or("there");
            return Some(format!("Hi {}, would {} work for you?", to, slot));
        }
        if let Some(first) = lines
            .iter()
            .find_map(|l| l.split_once(STRATEGIES))
            .and_then(|(_, strategies)| strategies.split(", ").next())
        {
            return Some(format!("{} {}\nThis is what the solver left on the table.", DECISION, first));
        }
        if let Some(slot) = lines.iter().rev().find_map(|l| l.split_once(" proposed ").map(|(_, slot)| slot)) {
            return Some(format!("{} {}\nSeconding the latest proposal.", PROPOSAL, slot));
        }
        if let Some(slot) = Self::favorite(&lines, "Times Available:", "1", "Day Valuations:") {
            let to = lines.iter().find_map(|l| l.strip_prefix("to: ")).unwrap_or("there");
            return Some(format!("Hi {}, would {} work for you?", to, slot));
        }
        if let Some(slot) = Self::favorite(&lines, "Your availability:", "Yes", "Your valuations:") {
            return Some(format!("{} {}\nMy most valuable open slot.", PROPOSAL, slot));
        }
        let me = lines
            .iter()
            .find_map(|l| l.strip_prefix(IDENTITY))
            .map(|me| me.trim_end_matches('.'))?;
        Self::section(&lines, "Public availability:")
            .into_iter()
            .find(|(seat, _)| *seat == me)
            .and_then(|(_, slots)| slots.split(", ").next())
            .map(|slot| format!("{} {}\nOpening with my first free slot.", PROPOSAL, slot))
    }

    /// The `label: value` lines directly under `header`.
    fn section<'a>(lines: &[&'a str], header: &str) -> Vec<(&'a str, &'a str)> {
        lines
            .iter()
            .skip_while(|l| **l != header)
            .skip(1)
            .map_while(|l| (*l).rsplit_once(": "))
            .collect()
    }

    /// Highest-valued slot marked `open`, earliest on ties.
    fn favorite<'a>(lines: &[&'a str], availability: &str, open: &str, valuations: &str) -> Option<&'a str> {
        let values = Self::section(lines, valuations);
        let value = |slot: &str| {
            values
                .iter()
                .find(|(label, _)| *label == slot)
                .and_then(|(_, v)| v.parse::<Utility>().ok())
                .unwrap_or(0.)
        };
        Self::section(lines, availability)
            .into_iter()
            .filter(|(_, mark)| *mark == open)
            .map(|(slot, _)| slot)
            .fold(None, |best: Option<&'a str>, slot| match best {
                Some(b) if value(b) >= value(slot) => Some(b),
                _ => Some(slot),
            })
    }
}

#[async_trait::async_trait]
impl Oracle for Mimic {
    async fn ask(&self, prompt: &Prompt) -> anyhow::Result<String> {
        Self::reply(&prompt.user).ok_or_else(|| anyhow::anyhow!("prompt carries no guidance to mimic"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friday() -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()
    }

    #[tokio::test]
    async fn mimics_every_protocol() {
        let classic = Scenario::classic().build().unwrap();
        let ref prompt = classic.prompt(Seat::from(0), &History::default(), &[Slot::from(2)]);
        let reply = Mimic.ask(prompt).await.unwrap();
        assert_eq!(reply, "Hi Suzy, would Wed work for you?");
        assert_eq!(classic.parse(&reply), Ok(Slot::from(2)));

        let conference = Scenario::conference(friday()).build().unwrap();
        let ref prompt = conference.prompt(Seat::from(0), &History::default(), &[Slot::from(5)]);
        let reply = Mimic.ask(prompt).await.unwrap();
        assert_eq!(conference.parse(&reply), Ok(Slot::from(5)));

        let dilemma = Bimatrix::prisoners_dilemma();
        let ref prompt = dilemma.prompt(Seat::from(0), &History::default(), &[Move::D]);
        let reply = Mimic.ask(prompt).await.unwrap();
        assert_eq!(dilemma.parse(&reply), Ok(Move::D));
    }

    #[tokio::test]
    async fn seconds_the_latest_proposal() {
        let game = Scenario::perfect(friday()).build().unwrap();
        let history = History::from(vec![(Seat::from(0), Slot::from(16)), (Seat::from(1), Slot::from(17))]);
        let ref prompt = game.prompt(Seat::from(2), &history, &[]);
        let reply = Mimic.ask(prompt).await.unwrap();
        assert_eq!(game.parse(&reply), Ok(Slot::from(17)));
    }

    #[tokio::test]
    async fn opens_without_guidance() {
        let classic = Scenario::classic().build().unwrap();
        let ref prompt = classic.prompt(Seat::from(0), &History::default(), &[]);
        let reply = Mimic.ask(prompt).await.unwrap();
        assert_eq!(reply, "Hi Suzy, would Mon work for you?");

        let conference = Scenario::conference(friday()).build().unwrap();
        let ref prompt = conference.prompt(Seat::from(0), &History::default(), &[]);
        let reply = Mimic.ask(prompt).await.unwrap();
        assert_eq!(conference.parse(&reply), Ok(Slot::from(3)));

        let perfect = Scenario::perfect(friday()).build().unwrap();
        let ref prompt = perfect.prompt(Seat::from(1), &History::default(), &[]);
        let reply = Mimic.ask(prompt).await.unwrap();
        assert_eq!(perfect.parse(&reply), Ok(Slot::from(10)));

        let ref prompt = Prompt {
            system: String::from("s"),
            user: String::from("Nothing to go on."),
        };
        assert!(Mimic.ask(prompt).await.is_err());
    }
}
