//! Interactive terminal front end.
//!
//! Reads one command per line from stdin and prints the resulting view. It
//! plays the part of the browser UI: the session gate picks between the login
//! prompt and the search view, and the consent prompt is shown on start.

mod command;
mod render;

pub use command::*;
pub use render::*;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::client::{build_http_client, ApiClient, ConsentClient};
use crate::config::Config;
use crate::consent::{ConsentGate, CONSENT_PROMPT};
use crate::errors::ClientError;
use crate::search::SearchController;
use crate::session::{login_error_message, SessionGate, SessionStore};

/// Everything the shell holds between input lines.
struct Shell {
    api: ApiClient,
    consent_client: ConsentClient,
    consent: ConsentGate,
    session: SessionGate,
    search: Option<SearchController>,
    enrich_locations: bool,
}

/// Run the shell until `quit` or end of input.
pub async fn run(config: &Config) -> Result<(), ClientError> {
    let http = build_http_client()?;
    let mut shell = Shell {
        api: ApiClient::new(http.clone(), &config.api_base_url),
        consent_client: ConsentClient::new(http, &config.consent_url),
        consent: ConsentGate::new(),
        session: SessionGate::open(SessionStore::new(&config.session_path)).await,
        search: None,
        enrich_locations: config.enrich_locations,
    };

    shell.consent.on_mount(&shell.consent_client).await;
    if shell.consent.show_modal() {
        println!("{}\n(answer with: consent accept | consent decline)", CONSENT_PROMPT);
    }

    if shell.session.is_authenticated() {
        shell.open_search().await;
    } else {
        println!("Fetch Dog Adoption - please log in: login <name> <email>");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => shell.handle(command).await,
            Ok(None) => {}
            Err(usage) => println!("{}", usage),
        }
    }

    tracing::info!("Shell closed");
    Ok(())
}

impl Shell {
    /// Mount a fresh search view: breeds first, then the first page.
    async fn open_search(&mut self) {
        let mut controller = SearchController::new(self.api.clone(), self.enrich_locations);
        controller.load_breeds().await;
        controller.apply_filters().await;
        print!("{}", render_view(controller.state()));
        self.search = Some(controller);
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Help => println!("{}", HELP),
            Command::Consent(allow) => {
                let result = if allow {
                    self.consent.accept(&self.consent_client).await
                } else {
                    self.consent.decline(&self.consent_client).await
                };
                if let Err(e) = result {
                    println!("! Could not save your cookie preference: {}", e.user_message());
                }
            }
            Command::Login { name, email } => {
                if self.session.is_authenticated() {
                    println!("Already logged in.");
                    return;
                }
                match self.session.login(&self.api, &name, &email).await {
                    Ok(()) => self.open_search().await,
                    Err(e) => println!("! {}", login_error_message(&e)),
                }
            }
            Command::Logout => {
                if let Err(e) = self.session.logout(&self.api).await {
                    println!("! {}", e.user_message());
                }
                // Favorites are discarded with the search view.
                self.search = None;
                println!("Logged out.");
            }
            other => match self.search.as_mut() {
                Some(controller) => Self::handle_search(controller, other).await,
                None => println!("Please log in first: login <name> <email>"),
            },
        }
    }

    async fn handle_search(controller: &mut SearchController, command: Command) {
        match command {
            Command::Breeds(prefix) => {
                let state = controller.state();
                let breeds: Vec<&str> = match prefix {
                    Some(prefix) => state.suggest_breeds(&prefix),
                    None => state.breeds().iter().map(String::as_str).collect(),
                };
                println!("{}", breeds.join(", "));
                return;
            }
            Command::Filter(change) => controller.set_filter(change).await,
            Command::Reset => controller.reset_filters().await,
            Command::Page(step) => controller.set_page(step).await,
            Command::Favorite(id) => {
                if !controller.toggle_favorite_by_id(&id) {
                    println!("No dog with id {} on this page.", id);
                    return;
                }
            }
            Command::Favorites => {
                let show = !controller.state().showing_favorites();
                controller.show_favorites(show).await;
            }
            Command::Match => match controller.find_match().await {
                Ok(()) => {
                    if let Some(outcome) = controller.state().match_result() {
                        println!("{}", render_match(outcome));
                    }
                    return;
                }
                Err(e) => {
                    println!("{}", e.user_message());
                    return;
                }
            },
            Command::CloseMatch => {
                controller.dismiss_match();
                return;
            }
            Command::Refresh => controller.apply_filters().await,
            _ => return,
        }
        print!("{}", render_view(controller.state()));
    }
}
