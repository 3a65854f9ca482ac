//! getopt-style flag parsing.
//!
//! Flags are registered against caller-owned destinations, then a single
//! [`FlagSet::parse`] walks the arguments: short options cluster (`-abc`),
//! value-taking short options accept attached or separate values (`-oVAL`,
//! `-o VAL`), long options accept `--name=value` or `--name value` and may be
//! abbreviated to any unambiguous prefix, and `--` ends option processing.
//! Positional arguments are collected in their original order.
//!
//! ```no_run
//! let mut verbose = false;
//! let mut count: i32 = 1;
//!
//! let mut flags = flagset::FlagSet::new();
//! flags.add_bool(&mut verbose, 'v', "verbose", "print more").unwrap();
//! flags.add_int(&mut count, 'c', "count", Some("NUM"), "repeat NUM times").unwrap();
//! flags.parse_env_or_exit();
//! let files = flags.args().to_vec();
//! drop(flags);
//! ```

use std::env;
use std::str::FromStr;

extern crate bit_set;


/// Creates a [`FlagSet`] named after the crate being built.
#[macro_export]
macro_rules! flagset {
    () => {{
        let mut fs = $crate::FlagSet::new();
        fs.set_prog_name(env!("CARGO_PKG_NAME"));
        fs
    }};
    ($name:expr) => {{
        let mut fs = $crate::FlagSet::new();
        fs.set_prog_name($name);
        fs
    }};
}

pub mod errors;
pub use errors::*;

pub mod value;
pub use value::{FromStrValue, Func, Parsed, Value};

mod registry;
pub use registry::{Flag, FlagHandle, LongMatch};
use registry::Registry;

mod parser;
mod printer;
pub use printer::diagnostic;

#[cfg(test)] mod test_long;

use bit_set::BitSet;
use tracing::debug;

type UsageFn<'a> = Box<dyn Fn(&FlagSet<'a>) -> String + 'a>;

/// Everything after the last `/` or `\`.
fn base_name(path: &str) -> &str {
    match path.rfind(|c| c == '/' || c == '\\') {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

pub struct FlagSet<'a> {
    registry: Registry<'a>,
    seen: BitSet,

    parsed: bool,
    prog_name: Option<String>,
    raw_args: Vec<String>,
    narg: usize,

    usage: Option<UsageFn<'a>>,
}

impl<'a> Default for FlagSet<'a> {
    fn default() -> Self {
        FlagSet::new()
    }
}

impl<'a> FlagSet<'a> {
    pub fn new() -> FlagSet<'a> {
        FlagSet {
            registry: Registry::new(),
            seen: BitSet::new(),
            parsed: false,
            prog_name: None,
            raw_args: vec![],
            narg: 0,
            usage: None,
        }
    }


    //----------------------------------------------------------------
    // program setup
    //----------------------------------------------------------------

    /// Overrides the name taken from `argv[0]`.
    pub fn set_prog_name(&mut self, name: &str) -> &mut FlagSet<'a> {
        self.prog_name = Some(name.to_string());
        self
    }

    pub fn prog_name(&self) -> &str {
        self.prog_name.as_deref().unwrap_or("")
    }

    /// Replaces the default listing printed for `-h`/`--help`.
    pub fn set_usage<F>(&mut self, usage: F) -> &mut FlagSet<'a>
    where
        F: Fn(&FlagSet<'a>) -> String + 'a,
    {
        self.usage = Some(Box::new(usage));
        self
    }

    /// The help text: the custom usage if one was set, else the flag listing.
    pub fn usage(&self) -> String {
        if let Some(f) = &self.usage {
            return f(self);
        }

        let mut p = printer::Printer::new(self.prog_name());
        for flag in self.registry.iter() {
            p.add_flag(flag);
        }

        // only the help names a user flag has not taken
        let help = Flag::help();
        let short = help.short().filter(|&c| self.registry.find_short(c).is_none());
        let long = help
            .long()
            .filter(|&l| !matches!(self.registry.find_long(l), LongMatch::Exact(_)));
        if short.is_some() || long.is_some() {
            p.add_row(printer::arg_string(short, long, None), help.usage());
        }
        p.render()
    }

    pub fn print_usage(&self) {
        print!("{}", self.usage());
    }


    //----------------------------------------------------------------
    // registration
    //----------------------------------------------------------------

    /// Registers any [`Value`]. `short` of `'\0'` and `long` of `""` mean the
    /// name is absent; `label` overrides the value's default placeholder.
    pub fn add<V: Value + 'a>(
        &mut self,
        value: V,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.registry
            .register(Flag::new(value, short, long, label, usage))
    }

    pub fn add_bool(
        &mut self,
        dest: &'a mut bool,
        short: char,
        long: &str,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.add(dest, short, long, None, usage)
    }

    pub fn add_int(
        &mut self,
        dest: &'a mut i32,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.add(dest, short, long, label, usage)
    }

    pub fn add_uint(
        &mut self,
        dest: &'a mut u32,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.add(dest, short, long, label, usage)
    }

    pub fn add_int64(
        &mut self,
        dest: &'a mut i64,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.add(dest, short, long, label, usage)
    }

    pub fn add_uint64(
        &mut self,
        dest: &'a mut u64,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.add(dest, short, long, label, usage)
    }

    pub fn add_float(
        &mut self,
        dest: &'a mut f32,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.add(dest, short, long, label, usage)
    }

    pub fn add_double(
        &mut self,
        dest: &'a mut f64,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.add(dest, short, long, label, usage)
    }

    pub fn add_string(
        &mut self,
        dest: &'a mut String,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.add(dest, short, long, label, usage)
    }

    /// Any `FromStr` destination.
    pub fn add_value<T: FromStr + 'a>(
        &mut self,
        dest: &'a mut T,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error> {
        self.add(FromStrValue(dest), short, long, label, usage)
    }

    /// A custom parser. Without a `label` the flag takes no argument and the
    /// callback always receives `None`.
    pub fn add_func<F>(
        &mut self,
        func: F,
        short: char,
        long: &str,
        label: Option<&str>,
        usage: &str,
    ) -> Result<FlagHandle, Error>
    where
        F: FnMut(Option<&str>, bool) -> Parsed + 'a,
    {
        self.add(Func(func), short, long, label, usage)
    }


    //----------------------------------------------------------------
    // introspection
    //----------------------------------------------------------------

    /// Registered flags in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag<'a>> {
        self.registry.iter()
    }

    pub fn flag(&self, handle: FlagHandle) -> Option<&Flag<'a>> {
        self.registry.get(handle.0)
    }

    pub fn lookup_short(&self, c: char) -> Option<&Flag<'a>> {
        self.registry
            .find_short(c)
            .and_then(|i| self.registry.get(i))
    }

    /// Exact long-name lookup, no prefix completion.
    pub fn lookup_long(&self, name: &str) -> Option<&Flag<'a>> {
        match self.registry.find_long(name) {
            LongMatch::Exact(i) => self.registry.get(i),
            _ => None,
        }
    }

    /// Whether the flag appeared during the last parse.
    pub fn is_seen(&self, handle: FlagHandle) -> bool {
        self.seen.contains(handle.0)
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Positional arguments, in the order given.
    pub fn args(&self) -> &[String] {
        if self.raw_args.is_empty() {
            return &[];
        }
        &self.raw_args[1..1 + self.narg]
    }

    pub fn narg(&self) -> usize {
        self.narg
    }


    //----------------------------------------------------------------
    // parsing
    //----------------------------------------------------------------

    /// Parses `argv` (program name first) and returns the number of
    /// positional arguments.
    ///
    /// Only the first successful call does any work; later calls return the
    /// same count. `-h`/`--help` stops the parse with
    /// [`Error::HelpRequested`].
    pub fn parse(&mut self, argv: Vec<String>) -> Result<usize, Error> {
        if self.parsed {
            debug!(narg = self.narg, "already parsed");
            return Ok(self.narg);
        }

        if self.prog_name.is_none() {
            self.prog_name = argv.first().map(|a| base_name(a).to_string());
        }
        debug!(prog = self.prog_name(), tokens = argv.len(), "parsing");

        self.raw_args = argv;
        self.narg = 0;
        self.seen.clear();

        let help = self.registry.register(Flag::help())?;
        let result = parser::Parser::new(
            &mut self.registry,
            &mut self.seen,
            Some(help.0),
            &mut self.raw_args,
        )
        .run();
        self.registry.pop();
        self.seen.remove(help.0);

        let narg = result?;
        debug!(narg, "parsed");
        self.narg = narg;
        self.parsed = true;
        Ok(narg)
    }

    pub fn parse_env(&mut self) -> Result<usize, Error> {
        self.parse(env::args().collect())
    }

    /// Like [`FlagSet::parse`], but prints the usage and exits 0 on help, and
    /// prints a diagnostic and exits 1 on any error.
    pub fn parse_or_exit(&mut self, argv: Vec<String>) -> usize {
        match self.parse(argv) {
            Ok(n) => n,
            Err(Error::HelpRequested) => {
                self.print_usage();
                std::process::exit(0);
            }
            Err(e) => {
                eprintln!("{}", diagnostic(self.prog_name(), &e));
                std::process::exit(1);
            }
        }
    }

    pub fn parse_env_or_exit(&mut self) -> usize {
        self.parse_or_exit(env::args().collect())
    }
}
