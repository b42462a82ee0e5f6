//! Brochure domain module
//!
//! The vocabulary shared between the HTTP adapter and the brochure application:
//! value types, commands, the user-interface seam the application writes its
//! outcome into, and the reference application used by the binary.

mod application;
mod command;
mod values;

pub use application::{BrochureApplication, CommandHandler, DomainApplication, DomainError};
pub use command::{Command, CommandParameters, CommandProvider, CommandType};
pub use values::{Basics, ContactMethod, ContactMethodType, Enterprise, Section};

use std::error::Error;

/// Receiver of the outcome of one processed command
///
/// Exactly one `show_*` method is expected per processed command.
pub trait UserInterface {
    fn show_cover(&mut self, cover_section: &Section, basics: &Basics);

    fn show_basics(&mut self, basics: &Basics);

    fn show_unknown_command(&mut self, basics: &Basics);

    fn show_unexpected_exception(&mut self, error: &(dyn Error + 'static), basics: Option<&Basics>);
}
