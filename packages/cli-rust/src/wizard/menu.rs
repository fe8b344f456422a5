//! Numbered template menu
//!
//! Choices 1-7 select a template, 8 exits. Text that is not an integer is
//! re-asked; an integer outside the menu is returned to the caller as-is.

use console::style;
use vhostgen_core::Template;

use crate::prompt::{Prompt, PromptError};

/// Menu number that ends the session without writing anything
pub const EXIT_CHOICE: i64 = 8;

/// What the operator picked from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuSelection {
    Template(Template),
    Exit,
    /// Parsed as an integer but not on the menu
    OutOfRange(i64),
}

impl MenuSelection {
    pub fn from_number(number: i64) -> Self {
        if number == EXIT_CHOICE {
            return MenuSelection::Exit;
        }
        Template::from_menu_number(number)
            .map(MenuSelection::Template)
            .unwrap_or(MenuSelection::OutOfRange(number))
    }
}

/// Menu lines, one per template plus the exit entry
pub fn menu_lines() -> Vec<String> {
    let mut lines: Vec<String> = Template::MENU
        .iter()
        .filter_map(|template| {
            let number = template.menu_number()?;
            Some(format!("{number}: {}", template.label()))
        })
        .collect();
    lines.push(format!("{EXIT_CHOICE}: Exit"));
    lines
}

/// Show the menu and read a choice, re-asking until the answer is an integer
pub fn ask_menu_choice<P: Prompt>(prompter: &mut P) -> Result<MenuSelection, PromptError> {
    prompter.say(style("What do you want to do?").bold())?;
    prompter.say("")?;
    for line in menu_lines() {
        prompter.say(line)?;
    }

    loop {
        let answer = prompter.ask_line("Enter a number:")?;
        match answer.trim().parse::<i64>() {
            Ok(number) => return Ok(MenuSelection::from_number(number)),
            Err(_) => {
                prompter.say(style("Please enter a number between 1 and 8.").yellow())?;
            }
        }
    }
}
