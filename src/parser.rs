//! The token state machine.
//!
//! Tokens are walked left to right. Positionals are rotated down to the
//! positional boundary as they are found, so that when the walk ends the
//! positionals sit contiguously right after the program name, in their
//! original order, with every option token (also in original order) behind
//! them.

use bit_set::BitSet;
use tracing::trace;

use crate::errors::{Error, Opt};
use crate::registry::{Flag, LongMatch, Registry};
use crate::value::Parsed;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Positional,
    Terminator,
    Long,
    Short,
}

impl TokenKind {
    fn of(token: &str) -> TokenKind {
        if token == "--" {
            TokenKind::Terminator
        } else if token.len() < 2 || !token.starts_with('-') {
            TokenKind::Positional
        } else if token.starts_with("--") {
            TokenKind::Long
        } else {
            TokenKind::Short
        }
    }
}

/// Position of the walk.
///
/// `[1, boundary)` holds the positionals found so far and `[boundary, token)`
/// the option tokens already handled. `offset` is the byte offset inside a
/// short cluster.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    token: usize,
    offset: usize,
    boundary: usize,
}

pub(crate) struct Parser<'s, 'a> {
    flags: &'s mut Registry<'a>,
    seen: &'s mut BitSet,
    help: Option<usize>,
    args: &'s mut [String],
    cursor: Cursor,
}

impl<'s, 'a> Parser<'s, 'a> {
    pub(crate) fn new(
        flags: &'s mut Registry<'a>,
        seen: &'s mut BitSet,
        help: Option<usize>,
        args: &'s mut [String],
    ) -> Parser<'s, 'a> {
        Parser {
            flags,
            seen,
            help,
            args,
            cursor: Cursor {
                token: 1,
                offset: 0,
                boundary: 1,
            },
        }
    }

    /// Walks every token and returns the number of positionals.
    pub(crate) fn run(mut self) -> Result<usize, Error> {
        while self.cursor.token < self.args.len() {
            let kind = TokenKind::of(&self.args[self.cursor.token]);
            trace!(
                index = self.cursor.token,
                token = %self.args[self.cursor.token],
                ?kind,
                "classified"
            );

            match kind {
                TokenKind::Terminator => {
                    self.terminate();
                    break;
                }
                TokenKind::Positional => self.positional(),
                TokenKind::Long => self.long_option()?,
                TokenKind::Short => self.short_cluster()?,
            }
        }

        Ok(self.cursor.boundary.saturating_sub(1))
    }

    fn positional(&mut self) {
        let Cursor { token, boundary, .. } = self.cursor;
        self.args[boundary..=token].rotate_right(1);
        self.cursor.boundary += 1;
        self.cursor.token += 1;
    }

    /// Everything after `--` is positional verbatim.
    fn terminate(&mut self) {
        let Cursor { token, boundary, .. } = self.cursor;
        let trailing = self.args.len() - token - 1;
        self.args[boundary..].rotate_left(token + 1 - boundary);
        self.cursor.boundary += trailing;
        self.cursor.token = self.args.len();
    }

    /// Marks `idx` as seen, returning whether it already was.
    fn mark_seen(seen: &mut BitSet, idx: usize) -> bool {
        !seen.insert(idx)
    }

    fn long_option(&mut self) -> Result<(), Error> {
        let index = self.cursor.token;
        let body = &self.args[index][2..];
        let (name, forced) = match body.find('=') {
            Some(eq) => (&body[..eq], Some(&body[eq + 1..])),
            None => (body, None),
        };

        let found = self.flags.find_long(name);
        let idx = match found.index() {
            Some(i) => i,
            None => {
                return Err(match found {
                    LongMatch::Ambiguous(candidates) => Error::AmbiguousOption {
                        opt: Opt::Long(name.to_string()),
                        candidates,
                    },
                    _ => Error::UnknownOption(Opt::Long(name.to_string())),
                });
            }
        };

        let seen = Self::mark_seen(self.seen, idx);
        let flag = self
            .flags
            .get_mut(idx)
            .ok_or_else(|| Error::UnknownOption(Opt::Long(name.to_string())))?;
        let opt = Opt::Long(flag.long().unwrap_or(name).to_string());

        if !flag.takes_arg() {
            if forced.is_some() {
                return Err(Error::ArgumentForced(opt));
            }
            if self.help == Some(idx) {
                return Err(Error::HelpRequested);
            }
            settle(flag, None, seen, opt)?;
            self.cursor.token += 1;
            return Ok(());
        }

        let (arg, from_next) = match forced {
            Some(a) => (Some(a), false),
            None => (self.args.get(index + 1).map(String::as_str), true),
        };
        match settle(flag, arg, seen, opt.clone())? {
            Parsed::Consumed if from_next && arg.is_some() => self.cursor.token += 2,
            // `--name=` is the same as giving no argument
            Parsed::ConsumedNoArg if forced.map_or(false, |a| !a.is_empty()) => {
                return Err(Error::ArgumentForced(opt));
            }
            _ => self.cursor.token += 1,
        }
        Ok(())
    }

    fn short_cluster(&mut self) -> Result<(), Error> {
        let index = self.cursor.token;
        let token = &self.args[index];
        let mut advance = 1;

        for (offset, c) in token.char_indices().skip(1) {
            self.cursor.offset = offset;
            trace!(index, offset = self.cursor.offset, option = %c, "short option");
            let idx = self
                .flags
                .find_short(c)
                .ok_or(Error::UnknownOption(Opt::Short(c)))?;

            let seen = Self::mark_seen(self.seen, idx);
            if self.help == Some(idx) {
                return Err(Error::HelpRequested);
            }
            let flag = self
                .flags
                .get_mut(idx)
                .ok_or(Error::UnknownOption(Opt::Short(c)))?;

            if !flag.takes_arg() {
                settle(flag, None, seen, Opt::Short(c))?;
                continue;
            }

            // a value-taking option ends the cluster
            let rest = &token[offset + c.len_utf8()..];
            let (arg, from_next) = if rest.is_empty() {
                (self.args.get(index + 1).map(String::as_str), true)
            } else {
                (Some(rest), false)
            };
            if let Parsed::Consumed = settle(flag, arg, seen, Opt::Short(c))? {
                if from_next && arg.is_some() {
                    advance = 2;
                }
            }
            break;
        }

        self.cursor.offset = 0;
        self.cursor.token += advance;
        Ok(())
    }
}

/// Runs the flag's value parser, turning its failures into errors.
fn settle(flag: &mut Flag<'_>, arg: Option<&str>, seen: bool, opt: Opt) -> Result<Parsed, Error> {
    match flag.set(arg, seen) {
        Parsed::NeedArgument => Err(Error::NeedArgument(opt)),
        Parsed::InvalidArgument => Err(Error::InvalidArgument {
            opt,
            arg: arg.unwrap_or_default().to_string(),
        }),
        ok => Ok(ok),
    }
}
