use std::fmt;

use thiserror::Error;

/// The option a parse error refers to.
///
/// Long options carry the resolved long name when resolution succeeded, and
/// the text the user typed otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Opt {
    Short(char),
    Long(String),
}

impl Opt {
    pub fn is_short(&self) -> bool {
        match self {
            Opt::Short(_) => true,
            Opt::Long(_) => false,
        }
    }
}

impl fmt::Display for Opt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Opt::Short(c) => write!(f, "-- '{}'", c),
            Opt::Long(name) => write!(f, "'--{}'", name),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    //
    // registration
    //
    #[error("short name {0:?} is not alphanumeric")]
    InvalidShortName(char),
    #[error("flag has neither a short nor a long name")]
    Unnamed,

    //
    // parse time
    //
    #[error("help requested")]
    HelpRequested,
    #[error("option requires an argument {0}")]
    NeedArgument(Opt),
    #[error("invalid argument '{arg}' for option {opt}")]
    InvalidArgument { opt: Opt, arg: String },
    #[error("option doesn't allow an argument {0}")]
    ArgumentForced(Opt),
    #[error("{problem} {0}", problem = unknown_problem(.0))]
    UnknownOption(Opt),
    #[error("ambiguous option {opt}; possibilities:{list}", list = possibilities(.candidates))]
    AmbiguousOption { opt: Opt, candidates: Vec<String> },
}

impl Error {
    /// The option the error was raised for, if it is a parse-time error.
    pub fn option(&self) -> Option<&Opt> {
        match self {
            Error::NeedArgument(opt)
            | Error::ArgumentForced(opt)
            | Error::UnknownOption(opt)
            | Error::InvalidArgument { opt, .. }
            | Error::AmbiguousOption { opt, .. } => Some(opt),
            Error::InvalidShortName(_) | Error::Unnamed | Error::HelpRequested => None,
        }
    }

    /// Registration mistakes made by the integrator rather than the user.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::InvalidShortName(_) | Error::Unnamed)
    }
}

fn unknown_problem(opt: &Opt) -> &'static str {
    if opt.is_short() {
        "invalid option"
    } else {
        "unrecognized option"
    }
}

fn possibilities(candidates: &[String]) -> String {
    candidates
        .iter()
        .map(|c| format!(" '--{}'", c))
        .collect()
}
