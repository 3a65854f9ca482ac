use flagset::flagset;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug)]
struct Options {
    verbose: bool,
    quiet: bool,
    audible: bool,
    ipv4_only: bool,
    ipv6_only: bool,

    count: i64,
    deadline: i32,
    ttl: i32,
    packet_size: u32,
    ident: u32,

    interval: f32,
    timeout: f64,
    interface: String,
}

impl Options {
    fn new() -> Options {
        Options {
            verbose: false,
            quiet: false,
            audible: false,
            ipv4_only: false,
            ipv6_only: false,

            count: -1,
            deadline: 0,
            ttl: 0,
            packet_size: 56,
            ident: std::process::id() % u32::from(u16::MAX),

            interval: 1.0,
            timeout: 0.0,
            interface: String::new(),
        }
    }
}

fn handle_args(opts: &mut Options) -> Result<Vec<String>, flagset::Error> {
    let mut fs = flagset!("ping");

    fs.add_bool(&mut opts.verbose, 'v', "verbose", "Verbose output.")?;
    fs.add_bool(&mut opts.quiet, 'q', "quiet", "Quiet output.")?;
    fs.add_bool(&mut opts.audible, 'a', "", "Audible ping (beep on success).")?;
    fs.add_bool(&mut opts.ipv4_only, '4', "", "Use IPv4 only.")?;
    fs.add_bool(&mut opts.ipv6_only, '6', "", "Use IPv6 only.")?;

    fs.add_int64(&mut opts.count, 'c', "count", Some("<NUM>"), "Stop after sending <NUM> packets.")?;
    fs.add_int(&mut opts.deadline, 'w', "deadline", Some("<SECS>"), "Exit after <SECS> seconds.")?;
    fs.add_int(&mut opts.ttl, 't', "ttl", Some("<NUM>"), "Set the IP Time to Live.")?;
    fs.add_uint(&mut opts.packet_size, 's', "size", Some("<NUM>"), "Set the packet size in bytes.")?;
    fs.add_uint(&mut opts.ident, '\0', "identifier", Some("<NUM>"), "Set the identifier.")?;

    fs.add_float(&mut opts.interval, 'i', "interval", Some("<TIME>"),
        "Wait <TIME> seconds between sending each packet.")?;
    fs.add_double(&mut opts.timeout, 'W', "timeout", Some("<TIME>"),
        "Time to wait for a response, in seconds.")?;
    fs.add_string(&mut opts.interface, 'I', "interface", Some("<IFACE>"),
        "Send packets through this interface.")?;

    fs.parse_env_or_exit();
    Ok(fs.args().to_vec())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();

    let mut opts = Options::new();
    match handle_args(&mut opts) {
        Ok(hosts) => {
            println!("hosts: {:?}", hosts);
        }
        Err(e) => {
            eprintln!("ping: {}", e);
            std::process::exit(1);
        }
    }
    println!("final config: {:#?}", opts);
}
