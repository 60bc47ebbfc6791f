use life_generations::{
    draw::{self, App},
    logging,
    proc::Field,
    vlog,
};

use std::io::{self, stdin, IsTerminal};

type Err = Box<dyn std::error::Error>;

const SAMPLE: [[bool; 3]; 3] = [
    [false, true, false],
    [false, false, true],
    [true, true, true],
];

const USAGE: &str = "\
Usage: life_generations [OPTIONS] < FIELD

Reads a field from stdin, one row per line ('0', ' ' and '.' are dead cells).
Without piped input a built-in sample field is used.

Options:
  -g, --generations <N>  generations to compute [default: 1]
  -a, --animate          animate the field in the terminal
  -d, --delay <MS>       delay between animation frames [default: 450]
  -v, --verbose          print diagnostics to stderr
  -h, --help             print this help
";

#[derive(Debug, PartialEq, Eq)]
struct Config {
    generations: u64,
    animate: bool,
    delay: u64,
    verbose: bool,
    help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            generations: 1,
            animate: false,
            delay: draw::DEFAULT_TIMEOUT,
            verbose: false,
            help: false,
        }
    }
}

impl Config {
    fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, Err> {
        let mut c = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-g" | "--generations" => c.generations = number(&arg, args.next())?,
                "-d" | "--delay" => c.delay = number(&arg, args.next())?,
                "-a" | "--animate" => c.animate = true,
                "-v" | "--verbose" => c.verbose = true,
                "-h" | "--help" => c.help = true,
                _ => return Err(format!("Unknown option '{arg}'\n\n{USAGE}").into()),
            }
        }
        Ok(c)
    }
}

fn number(flag: &str, value: Option<String>) -> Result<u64, Err> {
    let value = value.ok_or_else(|| format!("Option '{flag}' needs a value"))?;
    value
        .parse()
        .map_err(|e| format!("Bad value '{value}' for '{flag}': {e}").into())
}

fn main() -> Result<(), Err> {
    let config = Config::from_args(std::env::args().skip(1))?;
    if config.help {
        print!("{USAGE}");
        return Ok(());
    }
    if config.verbose {
        logging::enable_verbose_logging();
    }
    vlog!("{config:?}");

    let field = initial_field()?;
    vlog!(
        "initial field {}x{} with {} live cells",
        field.size().w(),
        field.size().h(),
        field.population()
    );

    let a = App::new(field, config.generations).with_timeout(config.delay);
    if config.animate {
        draw::run(a)?;
    } else {
        draw::report(&mut io::stdout().lock(), a)?;
    }
    Ok(())
}

fn initial_field() -> Result<Field, Err> {
    if stdin().is_terminal() {
        vlog!("stdin is a terminal, using the sample field");
        return Ok(Field::new(SAMPLE.iter().map(|r| r.to_vec()).collect())?);
    }
    Ok(Field::from_string(&readlines()?)?)
}

fn readlines() -> io::Result<String> {
    let mut s = String::new();
    for w in stdin().lines() {
        let w = w?;
        if !w.is_empty() {
            s.push_str(&w);
            s.push('\n')
        } else {
            break;
        }
    }
    Ok(s)
}
