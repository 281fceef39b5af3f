use crate::*;

impl<E> Dialogue for Bimatrix<E>
where
    E: Edge,
{
    fn prompt(&self, seat: Seat, _: &History<Self::E>, advice: &[Self::E]) -> Prompt {
        let strategies = match advice {
            [] => self.actions(),
            some => some,
        }
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ");
        let payoffs = self
            .matrix()
            .iter()
            .map(|((a, b), _)| format!("({}, {}): {}", a, b, self.utility(seat, *a, *b)))
            .collect::<Vec<_>>()
            .join(", ");
        let options = self
            .actions()
            .iter()
            .map(|e| format!("'{} {}'", DECISION, e))
            .collect::<Vec<_>>()
            .join(" or ");
        Prompt {
            system: String::from("You are a strategic decision-making agent."),
            user: format!(
                "{} {}{}\nCorresponding payoffs: {}\nPlease respond EXACTLY with {} on the first line, followed by a brief explanation.",
                seat, STRATEGIES, strategies, payoffs, options
            ),
        }
    }

    fn parse(&self, reply: &str) -> Result<Self::E, ReplyError> {
        let line = headline(reply)?;
        let decision = after(line, DECISION).ok_or_else(|| ReplyError::MissingDecision(line.to_string()))?;
        self.actions()
            .iter()
            .find(|e| e.to_string().eq_ignore_ascii_case(decision))
            .copied()
            .ok_or_else(|| ReplyError::UnknownDecision(decision.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dilemma_prompt_lists_own_payoffs() {
        let game = Bimatrix::prisoners_dilemma();
        let prompt = game.prompt(Seat::from(1), &History::default(), &[Move::D]);
        assert_eq!(prompt.system, "You are a strategic decision-making agent.");
        assert!(prompt.user.starts_with("Player 2 available strategies: D\n"));
        assert!(prompt.user.contains("Corresponding payoffs: (C, C): 3, (C, D): 5, (D, C): 0, (D, D): 1"));
        assert!(prompt.user.contains("'Decision: C' or 'Decision: D'"));
    }

    #[test]
    fn silent_prompt_offers_every_action() {
        let game = Bimatrix::battle_of_the_sexes();
        let prompt = game.prompt(Seat::from(0), &History::default(), &[]);
        assert!(prompt.user.starts_with("Player 1 available strategies: O, F\n"));
    }

    #[test]
    fn parses_first_line_only() {
        let game = Bimatrix::prisoners_dilemma();
        assert_eq!(game.parse("decision: d\nDefecting is dominant."), Ok(Move::D));
        assert_eq!(game.parse("Decision:C"), Ok(Move::C));
        assert_eq!(
            game.parse("I think\nDecision: C"),
            Err(ReplyError::MissingDecision(String::from("I think")))
        );
        assert_eq!(
            game.parse("Decision: maybe"),
            Err(ReplyError::UnknownDecision(String::from("maybe")))
        );
        assert_eq!(game.parse(""), Err(ReplyError::Empty));
    }
}
