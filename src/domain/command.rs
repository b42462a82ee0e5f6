// Command types module
// What the brochure application is asked to do for one request

use std::collections::BTreeMap;

/// Closed set of commands; extended only by adding routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    ShowCover,
    ShowBasics,
    Unknown,
}

/// Route-extracted values keyed by parameter name
pub type CommandParameters = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub command_type: CommandType,
    pub parameters: CommandParameters,
}

impl Command {
    pub const fn new(command_type: CommandType, parameters: CommandParameters) -> Self {
        Self {
            command_type,
            parameters,
        }
    }

    /// The sentinel produced when no route matches
    pub const fn unknown() -> Self {
        Self::new(CommandType::Unknown, BTreeMap::new())
    }
}

/// Deferred routing: the application decides when (and whether) to resolve it
pub type CommandProvider<'a> = Box<dyn FnOnce() -> Command + 'a>;
