//! Interactive portfolio shell
//!
//! Runs the page startup flow (loader, reveal, visitor prompt) and then reads
//! lines from stdin. Lines starting with `:` drive the panel controls; every
//! other line goes to the command terminal while the panel is visible.

use colored::*;
use eyre::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};
use std::thread;
use std::time::Duration;

use super::{open_site, visitors};
use crate::config::{Config, LoaderConfig};
use crate::loader::Loader;
use crate::render;
use crate::site::Site;
use crate::terminal::{PanelChange, Submission};
use crate::visitor::PromptExit;

/// Typed in the name prompt to register anonymously
const SKIP_WORD: &str = "/skip";

/// Panel controls understood by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Toggle,
    Open,
    Close,
    Theme,
    Visitors,
    /// Re-run the startup flow in the same session
    Reload,
    /// Re-run the startup flow in a fresh session
    NewSession,
    Help,
    Quit,
}

/// What the REPL does after a control
enum Flow {
    Continue,
    Startup,
    Quit,
}

impl Control {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().strip_prefix(':')?.trim().to_lowercase().as_str() {
            "toggle" | "t" => Some(Self::Toggle),
            "open" => Some(Self::Open),
            "close" => Some(Self::Close),
            "theme" => Some(Self::Theme),
            "visitors" | "v" => Some(Self::Visitors),
            "reload" => Some(Self::Reload),
            "new-session" => Some(Self::NewSession),
            "help" | "?" => Some(Self::Help),
            "quit" | "q" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub fn run(no_loader: bool, config: &Config) -> Result<()> {
    let mut site = open_site(config);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if config.loader.enabled && !no_loader && io::stdout().is_terminal() {
        run_loader(&config.loader)?;
    }

    startup(&mut site, &mut input)?;
    println!(
        "{}",
        "Panel controls: :toggle :open :close :theme :visitors :help :quit".dimmed()
    );
    if site.terminal().panel().is_visible() {
        for line in site.terminal().transcript() {
            println!("{}", render::line(line, site.theme()));
        }
    }

    repl(&mut site, &mut input)
}

/// Loader completion: reveal once, prompt if the session allows it, show the log
fn startup(site: &mut Site, input: &mut impl BufRead) -> Result<()> {
    let startup = site.on_loader_complete();
    if startup.reveal {
        print_banner(site);
    }
    if startup.prompt_visitor {
        prompt_visitor(site, input)?;
    }

    visitors::print_log(site);
    println!();
    Ok(())
}

fn run_loader(config: &LoaderConfig) -> Result<()> {
    let mut loader = Loader::new();
    let mut stdout = io::stdout();

    loop {
        let tick = loader.tick();
        write!(stdout, "\r  {} {:>3}%", "Loading".dimmed(), tick.percent)?;
        stdout.flush()?;
        if tick.finished {
            break;
        }
        thread::sleep(Duration::from_millis(config.tick_ms));
    }

    thread::sleep(Duration::from_millis(config.settle_ms));
    write!(stdout, "\r{}\r", " ".repeat(20))?;
    stdout.flush()?;
    Ok(())
}

fn print_banner(site: &Site) {
    let profile = &site.config().profile;
    let experience = site.experience();

    println!("{}", render::rule());
    println!("{}", profile.name.bold().yellow());
    println!("{}", profile.role);
    println!(
        "{} {} {}",
        "Experience:".dimmed(),
        experience.compact().green(),
        experience.tenure().dimmed()
    );
    println!("{}", render::rule());
    println!();
}

fn prompt_visitor(site: &mut Site, input: &mut impl BufRead) -> Result<()> {
    println!("{} {}", "🙏".yellow(), "Namaste! What should I call you?".bold());
    println!(
        "  {}",
        format!("Press Enter to submit, or type {} to stay anonymous", SKIP_WORD).dimmed()
    );

    while site.is_prompt_open() {
        print!("  {} ", "name:".cyan());
        io::stdout().flush()?;

        let mut raw = String::new();
        let read = input.read_line(&mut raw).context("Failed to read visitor name")?;
        if read == 0 {
            // no answer: leave the log and the session gate untouched
            site.dismiss_prompt();
            break;
        }
        let exit = if raw.trim() == SKIP_WORD {
            PromptExit::Skip
        } else if raw.ends_with('\n') {
            PromptExit::Enter(raw.trim_end_matches(['\n', '\r']).to_string())
        } else {
            // input ended without a newline
            PromptExit::Submit(raw)
        };

        if let Some(entry) = site.on_prompt_exit(exit) {
            println!("  {} Welcome, {}!", "✓".green(), entry.name.cyan());
        }
    }
    println!();
    Ok(())
}

fn repl(site: &mut Site, input: &mut impl BufRead) -> Result<()> {
    loop {
        if site.terminal().panel().is_visible() {
            print!("{} ", site.config().terminal.prompt.cyan().bold());
            io::stdout().flush()?;
        }

        let Some(line) = read_line(input)? else {
            break;
        };

        if let Some(control) = Control::parse(&line) {
            match apply_control(site, control) {
                Flow::Continue => {}
                Flow::Startup => startup(site, input)?,
                Flow::Quit => break,
            }
            continue;
        }

        if line.trim_start().starts_with(':') {
            println!("{}", format!("Unknown control '{}'. Try :help", line.trim()).dimmed());
            continue;
        }

        if !site.terminal().panel().is_visible() {
            if !line.trim().is_empty() {
                println!("{}", "Terminal is hidden. Use :toggle to open it.".dimmed());
            }
            continue;
        }

        match site.on_terminal_input(&line) {
            Submission::Ignored => {}
            Submission::Appended(lines) => {
                // an interactive console already shows what was typed
                let echoed = usize::from(io::stdin().is_terminal());
                for line in lines.iter().skip(echoed) {
                    println!("{}", render::line(line, site.theme()));
                }
            }
            Submission::Cleared(notice) => {
                if clears_screen(io::stdout().is_terminal()) {
                    print!("\x1b[2J\x1b[H");
                }
                println!("{}", render::line(&notice, site.theme()));
            }
        }
    }

    log::info!("Shell closed");
    Ok(())
}

fn apply_control(site: &mut Site, control: Control) -> Flow {
    match control {
        Control::Toggle => announce(site.on_terminal_toggle()),
        Control::Open => announce(site.on_terminal_open()),
        Control::Close => announce(site.on_terminal_close()),
        Control::Theme => {
            let theme = site.on_theme_toggle();
            println!("{} Theme switched to {}", "🎨".blue(), theme.as_str().cyan());
        }
        Control::Visitors => visitors::print_log(site),
        Control::Reload => return Flow::Startup,
        Control::NewSession => {
            site.begin_session();
            return Flow::Startup;
        }
        Control::Help => {
            println!(":toggle  show or hide the terminal");
            println!(":open    show the terminal");
            println!(":close   hide the terminal");
            println!(":theme   toggle dark/light");
            println!(":visitors show the visitor log");
            println!(":reload  replay startup in this session");
            println!(":new-session replay startup in a new session");
            println!(":quit    leave the shell");
            let names: Vec<&str> = site.terminal().commands().names().collect();
            println!("{} {}", "terminal commands:".dimmed(), names.join(", "));
        }
        Control::Quit => return Flow::Quit,
    }
    Flow::Continue
}

fn announce(change: PanelChange) {
    match change.focus_after {
        Some(delay) => {
            println!("{}", "Terminal opened.".dimmed());
            if io::stdout().is_terminal() {
                thread::sleep(delay);
            }
        }
        None => println!("{}", "Terminal hidden.".dimmed()),
    }
}

/// Escape sequences follow the same switch as colored output
fn clears_screen(stdout_is_terminal: bool) -> bool {
    stdout_is_terminal && colored::control::SHOULD_COLORIZE.should_colorize()
}

/// Next line without its newline; `None` at end of input
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
}
