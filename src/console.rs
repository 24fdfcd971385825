use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::models::wallet::{GiftCard, Wallet, WalletOwner};
use crate::repositories::wallet::wallet_path;
use crate::services::resource::{ResourceFactory, ResourceState, ResourceStore};
use crate::services::ServiceError;

// Owner identity used when a gift card is saved before any wallet data
// has been loaded.
const PLACEHOLDER_OWNER_ID: i64 = 2;
const PLACEHOLDER_OWNER_LOGIN: &str = "user";

/// User intents the console understands.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    Show,
    Refresh,
    Edit,
    GiftCards,
    View(i64),
    Add,
    Back,
    Help,
    Quit,
}

/// Which sub-view is active. Purely view-local state, never part of the
/// resource model.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Screen {
    Wallet,
    GiftCards,
    GiftCardDetail(i64),
}

pub fn parse_intent(line: &str) -> Option<Intent> {
    let mut words = line.split_whitespace();
    let command = words.next()?.to_lowercase();
    match command.as_str() {
        "show" => Some(Intent::Show),
        "refresh" => Some(Intent::Refresh),
        "edit" => Some(Intent::Edit),
        "giftcards" | "list" => Some(Intent::GiftCards),
        "view" => words.next()?.parse().ok().map(Intent::View),
        "add" => Some(Intent::Add),
        "back" => Some(Intent::Back),
        "help" => Some(Intent::Help),
        "quit" | "exit" => Some(Intent::Quit),
        _ => None,
    }
}

fn render_wallet(state: &ResourceState<Wallet>) -> String {
    if state.loading {
        return "Loading...".to_string();
    }
    if let Some(error) = &state.error {
        return format!("Error: {}", error);
    }
    match &state.data {
        Some(wallet) => format!(
            "Wallet #{}\n  Name:              {}\n  Credit:            {:.2}\n  Gift card balance: {:.2}\n  Owner:             {} (#{})",
            wallet.id, wallet.name, wallet.credit, wallet.giftcard, wallet.user.login, wallet.user.id
        ),
        None => "No wallet loaded. Type refresh to fetch it.".to_string(),
    }
}

fn render_giftcard_list(state: &ResourceState<GiftCard>) -> String {
    if state.loading {
        return "Loading...".to_string();
    }
    if let Some(error) = &state.error {
        return format!("Error: {}", error);
    }
    match &state.data {
        Some(card) => format!(
            "Gift cards\n  [{}] {} (balance {:.2})\nType view {} to inspect it, add to save a new one, back to return.",
            card.id, card.name, card.giftcard, card.id
        ),
        None => "No gift cards loaded. Type list to fetch them.".to_string(),
    }
}

fn render_giftcard_detail(state: &ResourceState<GiftCard>) -> String {
    if state.loading {
        return "Loading...".to_string();
    }
    if let Some(error) = &state.error {
        return format!("Error: {}", error);
    }
    match &state.data {
        Some(card) => format!(
            "Gift card #{}\n  Name:    {}\n  Credit:  {:.2}\n  Balance: {:.2}\n  Owner:   {} (#{})",
            card.id, card.name, card.credit, card.giftcard, card.user.login, card.user.id
        ),
        None => "No gift card loaded. Type refresh to fetch it.".to_string(),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  show           render the current view");
    println!("  refresh        fetch the current view again");
    println!("  edit           edit the wallet and save it");
    println!("  giftcards      list gift cards (alias: list)");
    println!("  view <id>      fetch one gift card");
    println!("  add            save a new gift card");
    println!("  back           return to the previous view");
    println!("  quit           leave the console (alias: exit)");
}

/// Terminal view over the wallet and gift card containers. Every dispatch
/// is awaited before the next intent is read, so a user cannot stack
/// requests on one container.
pub struct Console {
    factory: ResourceFactory,
    wallet: ResourceStore<Wallet>,
    giftcards: ResourceStore<GiftCard>,
    wallet_id: i64,
    giftcard_id: i64,
    screen: Screen,
    input: Lines<BufReader<Stdin>>,
}

impl Console {
    pub fn new(factory: ResourceFactory, wallet_id: i64) -> Self {
        let wallet = factory.container("wallet", wallet_path(wallet_id));
        let giftcards = factory.container("giftcard", wallet_path(wallet_id));
        Self {
            factory,
            wallet,
            giftcards,
            wallet_id,
            giftcard_id: wallet_id,
            screen: Screen::Wallet,
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("Carteira wallet console. Type help for commands.");
        self.refresh_wallet().await;

        loop {
            let prompt = self.prompt();
            let Some(line) = self.read_line(&prompt).await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            let Some(intent) = parse_intent(&line) else {
                println!("Unknown command. Type help for the list.");
                continue;
            };
            if !self.handle(intent).await? {
                break;
            }
        }

        Ok(())
    }

    async fn handle(&mut self, intent: Intent) -> Result<bool> {
        match intent {
            Intent::Show => self.show().await,
            Intent::Refresh => self.refresh_current().await,
            Intent::Edit => self.edit_wallet().await?,
            Intent::GiftCards => self.list_giftcards().await,
            Intent::View(id) => self.view_giftcard(id).await,
            Intent::Add => self.add_giftcard().await?,
            Intent::Back => self.go_back().await,
            Intent::Help => print_help(),
            Intent::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn prompt(&self) -> String {
        match self.screen {
            Screen::Wallet => "carteira> ".to_string(),
            Screen::GiftCards => "giftcards> ".to_string(),
            Screen::GiftCardDetail(id) => format!("giftcard {}> ", id),
        }
    }

    async fn show(&self) {
        match self.screen {
            Screen::Wallet => println!("{}", render_wallet(&self.wallet.snapshot().await)),
            Screen::GiftCards => {
                println!("{}", render_giftcard_list(&self.giftcards.snapshot().await))
            }
            Screen::GiftCardDetail(_) => {
                println!("{}", render_giftcard_detail(&self.giftcards.snapshot().await))
            }
        }
    }

    async fn refresh_current(&mut self) {
        match self.screen {
            Screen::Wallet => self.refresh_wallet().await,
            Screen::GiftCards => self.list_giftcards().await,
            Screen::GiftCardDetail(id) => self.view_giftcard(id).await,
        }
    }

    async fn refresh_wallet(&mut self) {
        println!("Loading...");
        match self.wallet.dispatch_fetch().await {
            Err(ServiceError::Busy(_)) => println!("A wallet request is already in flight."),
            _ => println!("{}", render_wallet(&self.wallet.snapshot().await)),
        }
    }

    async fn list_giftcards(&mut self) {
        self.bind_giftcards(self.wallet_id);
        self.screen = Screen::GiftCards;
        println!("Loading...");
        match self.giftcards.dispatch_fetch().await {
            Err(ServiceError::Busy(_)) => println!("A gift card request is already in flight."),
            _ => println!("{}", render_giftcard_list(&self.giftcards.snapshot().await)),
        }
    }

    async fn view_giftcard(&mut self, id: i64) {
        self.bind_giftcards(id);
        self.screen = Screen::GiftCardDetail(id);
        println!("Loading...");
        match self.giftcards.dispatch_fetch().await {
            Err(ServiceError::Busy(_)) => println!("A gift card request is already in flight."),
            _ => println!("{}", render_giftcard_detail(&self.giftcards.snapshot().await)),
        }
    }

    async fn edit_wallet(&mut self) -> Result<()> {
        self.screen = Screen::Wallet;
        let current = match self.wallet.snapshot().await.data {
            Some(wallet) => wallet,
            None => {
                println!("Load the wallet first (refresh).");
                return Ok(());
            }
        };

        println!(
            "Editing wallet #{} (empty input keeps the current value).",
            current.id
        );
        let name = self.prompt_text("Name", &current.name).await?;
        let credit = self.prompt_number("Credit", current.credit).await?;
        let giftcard = self
            .prompt_number("Gift card balance", current.giftcard)
            .await?;

        let payload = Wallet {
            id: current.id,
            name,
            credit,
            giftcard,
            user: current.user.clone(),
        };

        println!("Loading...");
        match self.wallet.dispatch_save(payload).await {
            Err(ServiceError::Busy(_)) => println!("A wallet request is already in flight."),
            _ => println!("{}", render_wallet(&self.wallet.snapshot().await)),
        }
        Ok(())
    }

    async fn add_giftcard(&mut self) -> Result<()> {
        self.bind_giftcards(self.wallet_id);
        self.screen = Screen::GiftCards;

        println!("Add gift card");
        let name = self.prompt_text("Name", "").await?;
        let credit = self.prompt_number("Credit", 0.0).await?;
        let giftcard = self.prompt_number("Gift card balance", 0.0).await?;

        // A save always carries the full resource, owner identity included.
        let owner = match self.wallet.snapshot().await.data {
            Some(wallet) => wallet.user,
            None => WalletOwner {
                id: PLACEHOLDER_OWNER_ID,
                login: PLACEHOLDER_OWNER_LOGIN.to_string(),
            },
        };

        let payload = GiftCard {
            id: self.wallet_id,
            name,
            credit,
            giftcard,
            user: owner,
        };

        println!("Loading...");
        match self.giftcards.dispatch_save(payload).await {
            Err(ServiceError::Busy(_)) => println!("A gift card request is already in flight."),
            Err(_) => println!("{}", render_giftcard_list(&self.giftcards.snapshot().await)),
            Ok(_) => {
                println!("Gift card saved.");
                println!("{}", render_giftcard_list(&self.giftcards.snapshot().await));
            }
        }
        Ok(())
    }

    async fn go_back(&mut self) {
        match self.screen {
            Screen::GiftCardDetail(_) => {
                self.screen = Screen::GiftCards;
                self.show().await;
            }
            Screen::GiftCards => {
                self.screen = Screen::Wallet;
                self.show().await;
            }
            Screen::Wallet => println!("Already at the wallet view."),
        }
    }

    fn bind_giftcards(&mut self, id: i64) {
        if self.giftcard_id != id {
            self.giftcards = self.factory.container("giftcard", wallet_path(id));
            self.giftcard_id = id;
        }
    }

    async fn prompt_text(&mut self, label: &str, current: &str) -> Result<String> {
        let line = self
            .read_line(&format!("{} [{}]: ", label, current))
            .await?
            .unwrap_or_default();
        let value = line.trim();
        if value.is_empty() {
            Ok(current.to_string())
        } else {
            Ok(value.to_string())
        }
    }

    async fn prompt_number(&mut self, label: &str, current: f64) -> Result<f64> {
        let line = self
            .read_line(&format!("{} [{}]: ", label, current))
            .await?
            .unwrap_or_default();
        let value = line.trim();
        if value.is_empty() {
            return Ok(current);
        }
        match value.parse() {
            Ok(number) => Ok(number),
            Err(_) => {
                println!("Not a number, keeping {}.", current);
                Ok(current)
            }
        }
    }

    async fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        Ok(self.input.next_line().await?)
    }
}
