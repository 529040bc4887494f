//! Interactive selection of city, month and day.
//!
//! The original quit-to-exit prompt loops are reimplemented as an explicit
//! state machine: the flow advances selecting-city → selecting-month →
//! selecting-day → confirmed, any step accepts `quit` to abort, and invalid
//! entries re-prompt without changing state. The analysis core is called
//! only once the flow reaches the confirmed state.

use std::io::{BufRead, Write};

use bikeshare_core::calendar;
use bikeshare_core::formatting::title_case;

use crate::cities;

/// Where the selection flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    SelectingCity,
    SelectingMonth,
    SelectingDay,
    Confirmed,
    Aborted,
}

/// A completed city/month/day selection, all values canonical lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub city: String,
    pub month: String,
    pub day: String,
}

/// The state machine itself. Pure: no I/O, fed one line at a time.
#[derive(Debug)]
pub struct PromptFlow {
    state: PromptState,
    city: Option<String>,
    month: Option<String>,
    day: Option<String>,
}

impl PromptFlow {
    pub fn new() -> Self {
        Self {
            state: PromptState::SelectingCity,
            city: None,
            month: None,
            day: None,
        }
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    /// The question to show for the current state, including the valid
    /// vocabulary. Empty once the flow has finished.
    pub fn prompt_text(&self) -> String {
        match self.state {
            PromptState::SelectingCity => format!(
                "Which city would you like to explore? ({}; or quit)",
                cities::city_names().join(", ")
            ),
            PromptState::SelectingMonth => format!(
                "Which month? ({}, all; or quit)",
                calendar::MONTHS.join(", ")
            ),
            PromptState::SelectingDay => {
                format!("Which day? ({}, all; or quit)", calendar::DAYS.join(", "))
            }
            PromptState::Confirmed | PromptState::Aborted => String::new(),
        }
    }

    /// Feed one line of user input.
    ///
    /// Advances the state on a valid entry, aborts on `quit`, and returns a
    /// re-prompt message (state unchanged) for anything else.
    pub fn handle_input(&mut self, input: &str) -> Option<String> {
        let entry = input.trim().to_lowercase();
        if entry == "quit" {
            self.state = PromptState::Aborted;
            return None;
        }

        match self.state {
            PromptState::SelectingCity => {
                if cities::city_file(&entry).is_ok() {
                    self.city = Some(entry);
                    self.state = PromptState::SelectingMonth;
                    None
                } else {
                    Some(format!(
                        "Sorry, there is no data available for '{}'.",
                        entry
                    ))
                }
            }
            PromptState::SelectingMonth => {
                if entry == calendar::ALL || calendar::month_number(&entry).is_some() {
                    self.month = Some(entry);
                    self.state = PromptState::SelectingDay;
                    None
                } else {
                    Some(format!("'{}' is not a month name or \"all\".", entry))
                }
            }
            PromptState::SelectingDay => {
                if entry == calendar::ALL || calendar::day_position(&entry).is_some() {
                    self.day = Some(entry);
                    self.state = PromptState::Confirmed;
                    None
                } else {
                    Some(format!("'{}' is not a weekday name or \"all\".", entry))
                }
            }
            PromptState::Confirmed | PromptState::Aborted => None,
        }
    }

    /// The completed selection, available once the state is `Confirmed`.
    pub fn selection(&self) -> Option<Selection> {
        if self.state != PromptState::Confirmed {
            return None;
        }
        Some(Selection {
            city: self.city.clone()?,
            month: self.month.clone()?,
            day: self.day.clone()?,
        })
    }
}

/// Drive a [`PromptFlow`] over line-based I/O.
///
/// Returns `Ok(None)` when the user aborts (typed `quit` or closed the
/// input stream).
pub fn run_prompt<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
) -> std::io::Result<Option<Selection>> {
    let mut flow = PromptFlow::new();

    loop {
        match flow.state() {
            PromptState::Confirmed => {
                let selection = flow.selection();
                if let Some(sel) = &selection {
                    writeln!(
                        output,
                        "Exploring {} (month: {}, day: {})",
                        title_case(&sel.city),
                        title_case(&sel.month),
                        title_case(&sel.day)
                    )?;
                }
                return Ok(selection);
            }
            PromptState::Aborted => return Ok(None),
            _ => {}
        }

        writeln!(output, "{}", flow.prompt_text())?;
        write!(output, "Explore: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input behaves like quit.
            return Ok(None);
        }

        if let Some(message) = flow.handle_input(&line) {
            writeln!(output, "{}", message)?;
        }
    }
}

/// Ask a yes/no question, re-prompting until one of the two is entered.
/// `quit` and end-of-input count as no.
pub fn ask_yes_no<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    question: &str,
) -> std::io::Result<bool> {
    loop {
        write!(output, "{}", question)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        match line.trim().to_lowercase().as_str() {
            "yes" => return Ok(true),
            "no" | "quit" => return Ok(false),
            other => {
                writeln!(output, "Only yes and no are valid entries. You entered '{}'.", other)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    // ── PromptFlow transitions ────────────────────────────────────────────────

    #[test]
    fn test_flow_happy_path() {
        let mut flow = PromptFlow::new();
        assert_eq!(flow.state(), &PromptState::SelectingCity);

        assert!(flow.handle_input("chicago").is_none());
        assert_eq!(flow.state(), &PromptState::SelectingMonth);

        assert!(flow.handle_input("march").is_none());
        assert_eq!(flow.state(), &PromptState::SelectingDay);

        assert!(flow.handle_input("monday").is_none());
        assert_eq!(flow.state(), &PromptState::Confirmed);

        let selection = flow.selection().unwrap();
        assert_eq!(
            selection,
            Selection {
                city: "chicago".to_string(),
                month: "march".to_string(),
                day: "monday".to_string(),
            }
        );
    }

    #[test]
    fn test_flow_normalises_case_and_whitespace() {
        let mut flow = PromptFlow::new();
        flow.handle_input("  New York City ");
        flow.handle_input("ALL");
        flow.handle_input(" Sunday");
        let selection = flow.selection().unwrap();
        assert_eq!(selection.city, "new york city");
        assert_eq!(selection.month, "all");
        assert_eq!(selection.day, "sunday");
    }

    #[test]
    fn test_flow_invalid_city_keeps_state() {
        let mut flow = PromptFlow::new();
        let message = flow.handle_input("atlantis");
        assert!(message.is_some());
        assert_eq!(flow.state(), &PromptState::SelectingCity);
    }

    #[test]
    fn test_flow_invalid_month_keeps_state() {
        let mut flow = PromptFlow::new();
        flow.handle_input("chicago");
        let message = flow.handle_input("smarch");
        assert!(message.is_some());
        assert_eq!(flow.state(), &PromptState::SelectingMonth);
    }

    #[test]
    fn test_flow_quit_aborts_at_any_step() {
        let mut flow = PromptFlow::new();
        flow.handle_input("quit");
        assert_eq!(flow.state(), &PromptState::Aborted);
        assert!(flow.selection().is_none());

        let mut flow = PromptFlow::new();
        flow.handle_input("washington");
        flow.handle_input("quit");
        assert_eq!(flow.state(), &PromptState::Aborted);

        let mut flow = PromptFlow::new();
        flow.handle_input("washington");
        flow.handle_input("june");
        flow.handle_input("QUIT");
        assert_eq!(flow.state(), &PromptState::Aborted);
    }

    #[test]
    fn test_flow_selection_none_before_confirmed() {
        let mut flow = PromptFlow::new();
        assert!(flow.selection().is_none());
        flow.handle_input("chicago");
        assert!(flow.selection().is_none());
    }

    // ── run_prompt ────────────────────────────────────────────────────────────

    #[test]
    fn test_run_prompt_full_session() {
        let input = Cursor::new("chicago\nmarch\nmonday\n");
        let mut output = Vec::new();
        let selection = run_prompt(input, &mut output).unwrap().unwrap();
        assert_eq!(selection.city, "chicago");

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Which city"));
        assert!(text.contains("Exploring Chicago (month: March, day: Monday)"));
    }

    #[test]
    fn test_run_prompt_reprompts_on_invalid() {
        let input = Cursor::new("nowhere\nwashington\nall\nall\n");
        let mut output = Vec::new();
        let selection = run_prompt(input, &mut output).unwrap().unwrap();
        assert_eq!(selection.city, "washington");

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("no data available for 'nowhere'"));
    }

    #[test]
    fn test_run_prompt_quit_returns_none() {
        let input = Cursor::new("quit\n");
        let mut output = Vec::new();
        assert!(run_prompt(input, &mut output).unwrap().is_none());
    }

    #[test]
    fn test_run_prompt_eof_returns_none() {
        let input = Cursor::new("chicago\n");
        let mut output = Vec::new();
        assert!(run_prompt(input, &mut output).unwrap().is_none());
    }

    // ── ask_yes_no ────────────────────────────────────────────────────────────

    #[test]
    fn test_ask_yes_no_accepts_yes() {
        let input = Cursor::new("yes\n");
        let mut output = Vec::new();
        assert!(ask_yes_no(input, &mut output, "Again? ").unwrap());
    }

    #[test]
    fn test_ask_yes_no_reprompts_until_valid() {
        let input = Cursor::new("maybe\nNO\n");
        let mut output = Vec::new();
        assert!(!ask_yes_no(input, &mut output, "Again? ").unwrap());
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Only yes and no"));
    }

    #[test]
    fn test_ask_yes_no_eof_is_no() {
        let input = Cursor::new("");
        let mut output = Vec::new();
        assert!(!ask_yes_no(input, &mut output, "Again? ").unwrap());
    }
}
