//! Parsing of shell input lines.

use crate::models::{AgeRange, FilterChange, SortOrder};
use crate::search::PageStep;

pub const HELP: &str = "\
Commands:
  login <name> <email>     log in (name may contain spaces)
  logout                   end the session
  breeds [prefix]          list breeds, or those starting with prefix
  breed <name>|none        filter by breed
  zip <5 digits>|none      filter by zip code (overrides city/state)
  city <name>|none         filter by city
  state <XX>|none          filter by two-letter state
  age <min> <max>          filter by age range (0-20)
  sort asc|desc            sort by breed
  reset                    reset all filters
  next | prev | page <n>   navigate pages (page numbers start at 1)
  fav <id>                 toggle a favorite
  favorites                switch between all dogs and favorites
  match                    find the best match among favorites
  close                    close the match dialog
  consent accept|decline   answer the cookie prompt
  refresh                  re-run the current search
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Login { name: String, email: String },
    Logout,
    Breeds(Option<String>),
    Filter(FilterChange),
    Reset,
    Page(PageStep),
    Favorite(String),
    Favorites,
    Match,
    CloseMatch,
    Consent(bool),
    Refresh,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "login" => parse_login(rest)?,
        "logout" => Command::Logout,
        "breeds" => Command::Breeds(optional(rest)),
        "breed" => Command::Filter(FilterChange::Breed(optional(rest))),
        "zip" => Command::Filter(FilterChange::ZipCode(optional(rest).unwrap_or_default())),
        "city" => Command::Filter(FilterChange::City(optional(rest).unwrap_or_default())),
        "state" => Command::Filter(FilterChange::State(optional(rest).unwrap_or_default())),
        "age" => Command::Filter(FilterChange::AgeRange(parse_age(rest)?)),
        "sort" => Command::Filter(FilterChange::Sort(
            SortOrder::parse(rest).ok_or_else(|| "usage: sort asc|desc".to_string())?,
        )),
        "reset" => Command::Reset,
        "next" => Command::Page(PageStep::Next),
        "prev" | "previous" => Command::Page(PageStep::Previous),
        "page" => {
            let n: usize = rest
                .parse()
                .map_err(|_| "usage: page <number>".to_string())?;
            Command::Page(PageStep::To(n.saturating_sub(1)))
        }
        "fav" | "favorite" => {
            if rest.is_empty() {
                return Err("usage: fav <id>".to_string());
            }
            Command::Favorite(rest.to_string())
        }
        "favorites" | "favs" => Command::Favorites,
        "match" => Command::Match,
        "close" => Command::CloseMatch,
        "consent" => match rest.to_ascii_lowercase().as_str() {
            "accept" | "yes" => Command::Consent(true),
            "decline" | "no" => Command::Consent(false),
            _ => return Err("usage: consent accept|decline".to_string()),
        },
        "refresh" => Command::Refresh,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };

    Ok(Some(command))
}

/// `none` and empty input clear a filter.
fn optional(rest: &str) -> Option<String> {
    if rest.is_empty() || rest.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(rest.to_string())
    }
}

fn parse_login(rest: &str) -> Result<Command, String> {
    match rest.rsplit_once(char::is_whitespace) {
        Some((name, email)) => Ok(Command::Login {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        }),
        None => Err("usage: login <name> <email>".to_string()),
    }
}

fn parse_age(rest: &str) -> Result<AgeRange, String> {
    let usage = || "usage: age <min> <max>".to_string();
    let mut parts = rest.split_whitespace();
    let min: u32 = parts.next().and_then(|v| v.parse().ok()).ok_or_else(usage)?;
    let max: u32 = parts.next().and_then(|v| v.parse().ok()).ok_or_else(usage)?;
    Ok(AgeRange::new(min, max))
}
