use tracing::{debug, trace};

use crate::errors::Error;
use crate::value::{HelpRequest, Parsed, Value};

/// Index of a registered flag, returned by the `FlagSet::add_*` family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlagHandle(pub(crate) usize);

impl FlagHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A registered flag: its names, usage text and destination.
pub struct Flag<'a> {
    short: Option<char>,
    long: Option<String>,
    arg_name: Option<String>,
    usage: String,
    value: Box<dyn Value + 'a>,
}

impl<'a> Flag<'a> {
    /// `'\0'` and `""` stand for "no short name" and "no long name". The
    /// placeholder falls back to the value's own, whose absence makes this
    /// a flag without argument.
    pub fn new<V: Value + 'a>(
        value: V,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Flag<'a> {
        let arg_name = label
            .map(str::to_string)
            .or_else(|| value.arg_name().map(str::to_string));
        Flag {
            short: if short == '\0' { None } else { Some(short) },
            long: if long.is_empty() { None } else { Some(long.to_string()) },
            arg_name,
            usage: usage.to_string(),
            value: Box::new(value),
        }
    }

    pub(crate) fn help() -> Flag<'static> {
        Flag::new(HelpRequest, 'h', "help", None, "print this help and exit")
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub fn arg_name(&self) -> Option<&str> {
        self.arg_name.as_deref()
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn takes_arg(&self) -> bool {
        self.arg_name.is_some()
    }

    pub(crate) fn set(&mut self, arg: Option<&str>, seen: bool) -> Parsed {
        self.value.set(arg, seen)
    }
}

/// Result of resolving a long option against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LongMatch {
    Exact(usize),
    Prefix(usize),
    Ambiguous(Vec<String>),
    NotFound,
}

impl LongMatch {
    pub fn index(&self) -> Option<usize> {
        match self {
            LongMatch::Exact(i) | LongMatch::Prefix(i) => Some(*i),
            LongMatch::Ambiguous(_) | LongMatch::NotFound => None,
        }
    }
}

#[derive(Default)]
pub struct Registry<'a> {
    flags: Vec<Flag<'a>>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Registry<'a> {
        Registry { flags: vec![] }
    }

    pub fn register(&mut self, flag: Flag<'a>) -> Result<FlagHandle, Error> {
        if let Some(c) = flag.short {
            if !c.is_ascii_alphanumeric() {
                return Err(Error::InvalidShortName(c));
            }
        }
        if flag.short.is_none() && flag.long.is_none() {
            return Err(Error::Unnamed);
        }

        debug!(
            short = ?flag.short,
            long = ?flag.long,
            arg_name = ?flag.arg_name,
            "registered flag"
        );
        self.flags.push(flag);
        Ok(FlagHandle(self.flags.len() - 1))
    }

    /// Removes the most recently registered flag.
    pub(crate) fn pop(&mut self) -> Option<Flag<'a>> {
        self.flags.pop()
    }

    pub fn get(&self, idx: usize) -> Option<&Flag<'a>> {
        self.flags.get(idx)
    }

    pub(crate) fn get_mut(&mut self, idx: usize) -> Option<&mut Flag<'a>> {
        self.flags.get_mut(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Flag<'a>> {
        self.flags.iter()
    }

    /// First flag registered with exactly this short name.
    pub fn find_short(&self, c: char) -> Option<usize> {
        self.flags.iter().position(|f| f.short == Some(c))
    }

    /// Resolves `opt` to a long name. An exact match wins outright; otherwise
    /// a single longer name starting with `opt` is accepted and several are
    /// ambiguous. The empty name matches nothing.
    pub fn find_long(&self, opt: &str) -> LongMatch {
        if opt.is_empty() {
            return LongMatch::NotFound;
        }

        let mut candidates: Vec<usize> = vec![];
        for (i, f) in self.flags.iter().enumerate() {
            let name = match f.long.as_deref() {
                Some(n) => n,
                None => continue,
            };
            if name == opt {
                trace!(opt, "exact long match");
                return LongMatch::Exact(i);
            }
            if name.len() > opt.len() && name.starts_with(opt) {
                candidates.push(i);
            }
        }

        match candidates.len() {
            0 => LongMatch::NotFound,
            1 => {
                trace!(opt, name = ?self.flags[candidates[0]].long, "unique prefix");
                LongMatch::Prefix(candidates[0])
            }
            _ => LongMatch::Ambiguous(
                candidates
                    .into_iter()
                    .filter_map(|i| self.flags[i].long.clone())
                    .collect(),
            ),
        }
    }
}
