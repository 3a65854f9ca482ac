use crate::errors::Error;
use crate::registry::Flag;

const LEFT_PAD_LENGTH: usize = 2;
const MID_PAD_LENGTH: usize = 4;

/// Wraps a placeholder in angle brackets unless it already carries them.
fn placeholder(label: &str) -> String {
    if label.starts_with('<') {
        label.to_string()
    } else {
        format!("<{}>", label)
    }
}

/// Left column of a usage row: `-c, --count=<int>`, `    --name=<string>`
/// or `-a <int>`.
pub fn arg_string(short: Option<char>, long: Option<&str>, label: Option<&str>) -> String {
    let mut out = match short {
        Some(c) if long.is_some() => format!("-{}, ", c),
        Some(c) => format!("-{}", c),
        None => "    ".to_string(),
    };

    match (long, label) {
        (Some(l), Some(lbl)) => out.push_str(&format!("--{}={}", l, placeholder(lbl))),
        (Some(l), None) => out.push_str(&format!("--{}", l)),
        (None, Some(lbl)) => out.push_str(&format!(" {}", placeholder(lbl))),
        (None, None) => {}
    }
    out
}

struct Row {
    left: String,
    usage: String,
}

/// Column-aligned flag listing.
pub struct Printer {
    name: String,
    rows: Vec<Row>,
    longest_left: usize,
}

impl Printer {
    pub fn new(name: &str) -> Printer {
        Printer {
            name: name.to_string(),
            rows: vec![],
            longest_left: 0,
        }
    }

    pub fn add_flag(&mut self, flag: &Flag<'_>) {
        self.add_row(
            arg_string(flag.short(), flag.long(), flag.arg_name()),
            flag.usage(),
        );
    }

    pub fn add_row(&mut self, left: String, usage: &str) {
        self.longest_left = std::cmp::max(self.longest_left, left.chars().count());
        self.rows.push(Row {
            left,
            usage: usage.to_string(),
        });
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.name.is_empty() {
            out.push_str(&format!("usage: {} [options] [args...]\n\n", self.name));
        }

        if !self.rows.is_empty() {
            out.push_str("options:\n");
        }
        for row in self.rows.iter() {
            out.push_str(&" ".repeat(LEFT_PAD_LENGTH));
            out.push_str(&row.left);
            if !row.usage.is_empty() {
                let mid = self.longest_left - row.left.chars().count() + MID_PAD_LENGTH;
                out.push_str(&" ".repeat(mid));
                out.push_str(&row.usage);
            }
            out.push('\n');
        }
        out
    }
}

/// The two-line message shown for a parse error.
pub fn diagnostic(prog_name: &str, err: &Error) -> String {
    format!(
        "{}: {}\nTry '{} --help' for more information.",
        prog_name, err, prog_name
    )
}
