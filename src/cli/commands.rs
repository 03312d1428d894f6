//! CLI Command Implementations
//!
//! A line-oriented driver for a plate session. Each input line is one
//! command; the same parser serves the interactive prompt and scripts.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context};
use log::{info, warn};

use crate::config::{self, SubmitConfig};
use crate::menu::{DishList, MenuCatalog, SeedDish};
use crate::order::{
    CollectingObserver, HttpOrderSubmitter, MockSubmitter, OrderSubmitter, Review, ReviewPrompt,
};
use crate::session::{Action, Outcome, PlateSession};

pub const HELP: &str = "\
Commands:
  add                      start a new component
  cell <0-5>               pick a square on the active layer
  category <name>          choose a category
  type <name>              choose a protein type
  item <name>              choose an item
  method <name>            choose a cooking method
  temp <name>              choose a temperature
  addons <a, b, ...>       choose add-ons from the seed dish
  beverage <id|name>       choose a suggested beverage
  skip                     pass over add-ons or beverage
  reset                    abandon the component in progress
  layer add                add a layer
  layer delete <id>        delete a layer (ids start at 0)
  layer select <id>        switch the active layer
  remove <layer> <index>   take a component off the plate
  show | options | order   show the plate, current choices, or order JSON
  submit                   send the order
  review <text>            review the last order
  help | quit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Act(Action),
    Show,
    Options,
    Order,
    Submit,
    Review(String),
    Help,
    Quit,
}

/// Parse an input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "add" => Command::Act(Action::AddComponent),
        "cell" | "pick" => Command::Act(Action::PickCell(number(rest, "cell")?)),
        "category" => Command::Act(Action::Category(text(rest, word)?)),
        "type" | "subcategory" => Command::Act(Action::Subcategory(text(rest, word)?)),
        "item" => Command::Act(Action::Item(text(rest, word)?)),
        "method" => Command::Act(Action::Method(text(rest, word)?)),
        "temp" | "temperature" => Command::Act(Action::Temperature(text(rest, word)?)),
        "addons" => Command::Act(Action::Addons(
            rest.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )),
        "beverage" => Command::Act(Action::Beverage(text(rest, word)?)),
        "skip" => Command::Act(Action::Skip),
        "reset" => Command::Act(Action::Reset),
        "layer" => parse_layer(rest)?,
        "remove" => {
            let mut args = rest.split_whitespace();
            let (Some(layer), Some(index), None) = (args.next(), args.next(), args.next()) else {
                bail!("usage: remove <layer> <index>");
            };
            Command::Act(Action::RemoveComponent {
                layer: number(layer, "layer")?,
                index: number(index, "index")?,
            })
        }
        "show" => Command::Show,
        "options" => Command::Options,
        "order" => Command::Order,
        "submit" => Command::Submit,
        "review" => Command::Review(rest.to_string()),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}', try 'help'", other),
    };
    Ok(Some(command))
}

fn parse_layer(rest: &str) -> anyhow::Result<Command> {
    let (verb, arg) = match rest.split_once(char::is_whitespace) {
        Some((verb, arg)) => (verb, arg.trim()),
        None => (rest, ""),
    };
    let action = match verb {
        "add" => Action::AddLayer,
        "delete" => Action::DeleteLayer(number(arg, "layer")?),
        "select" => Action::SelectLayer(number(arg, "layer")?),
        _ => bail!("usage: layer add | layer delete <id> | layer select <id>"),
    };
    Ok(Command::Act(action))
}

fn number(raw: &str, what: &str) -> anyhow::Result<usize> {
    raw.trim()
        .parse()
        .map_err(|_| anyhow!("expected a {} number, got '{}'", what, raw.trim()))
}

fn text(raw: &str, what: &str) -> anyhow::Result<String> {
    if raw.is_empty() {
        bail!("'{}' needs a value", what);
    }
    Ok(raw.to_string())
}

/// Drives one session from parsed commands
pub struct Runner<'a> {
    session: PlateSession,
    submitter: &'a dyn OrderSubmitter,
    user_id: Option<String>,
    echo_orders: bool,
    prompt: Option<ReviewPrompt>,
    reviews: Vec<Review>,
}

impl<'a> Runner<'a> {
    pub fn new(session: PlateSession, submitter: &'a dyn OrderSubmitter, user_id: Option<String>) -> Self {
        Self {
            session,
            submitter,
            user_id,
            echo_orders: false,
            prompt: None,
            reviews: Vec::new(),
        }
    }

    /// Print each order as JSON before it is submitted
    pub fn echo_orders(mut self, echo: bool) -> Self {
        self.echo_orders = echo;
        self
    }

    pub fn session(&self) -> &PlateSession {
        &self.session
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Run one command; returns `false` when the user asked to quit
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<bool> {
        match command {
            Command::Act(action) => {
                match self.session.apply(action)? {
                    Outcome::Ignored { reason, .. } => writeln!(out, "! {}", reason)?,
                    Outcome::Removed { item } => writeln!(out, "Removed {}", item)?,
                    Outcome::Wizard(_) | Outcome::Layers { .. } => {}
                }
                writeln!(out, "{}", self.session.view())?;
            }
            Command::Show => writeln!(out, "{}", self.session.view())?,
            Command::Options => {
                let options = self.session.options();
                if options.is_empty() {
                    writeln!(out, "{}", self.session.state().prompt())?;
                }
                for option in options {
                    writeln!(out, "  {}", option)?;
                }
            }
            Command::Order => {
                let payload = self.session.payload(self.user_id.as_deref());
                writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
            }
            Command::Submit => self.submit(out)?,
            Command::Review(text) => match &self.prompt {
                None => writeln!(out, "! No order to review yet")?,
                Some(prompt) => match prompt.respond(&text) {
                    Ok(review) => {
                        writeln!(out, "Thanks for your review!")?;
                        self.reviews.push(review);
                        self.prompt = None;
                    }
                    Err(e) => writeln!(out, "! {}", e.friendly_message())?,
                },
            },
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn submit<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        if self.echo_orders {
            let payload = self.session.payload(self.user_id.as_deref());
            writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
        }

        let mut observer = CollectingObserver::default();
        match self
            .session
            .submit(self.user_id.as_deref(), self.submitter, &mut observer)
        {
            Ok(receipt) => {
                writeln!(
                    out,
                    "Order {} sent ({} lines)",
                    receipt.submission_id, receipt.line_count
                )?;
                if let Some(prompt) = observer.prompts.pop() {
                    writeln!(out, "{}\n{}", prompt.title, prompt.message)?;
                    self.prompt = Some(prompt);
                }
            }
            Err(e) => {
                warn!("Submission failed: {}", e);
                for notice in &observer.notices {
                    writeln!(out, "! {}", notice)?;
                }
            }
        }
        Ok(())
    }

    /// Feed every line of `input` through the parser until EOF or `quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("Failed to read command")?;
            match parse_command(&line) {
                Ok(Some(command)) => {
                    if !self.execute(command, out)? {
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => writeln!(out, "! {}", e)?,
            }
        }
        Ok(())
    }
}

/// Settings for `compose`
#[derive(Debug, Clone, Default)]
pub struct ComposeOptions {
    pub menu: Option<PathBuf>,
    pub seed: Option<PathBuf>,
    pub dishes: Option<PathBuf>,
    pub dish: Option<String>,
    pub user: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_ms: Option<u64>,
    pub dry_run: bool,
    pub script: Option<PathBuf>,
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<MenuCatalog> {
    match path {
        Some(path) => MenuCatalog::load(path)
            .with_context(|| format!("Failed to load menu {}", path.display())),
        None => Ok(MenuCatalog::builtin()),
    }
}

fn load_dishes(path: &Path) -> anyhow::Result<DishList> {
    DishList::load(path).with_context(|| format!("Failed to load dish list {}", path.display()))
}

/// Print the menu catalog as a tree or as JSON, optionally with the dish list.
pub fn show_menu(path: Option<&Path>, json: bool, dishes: Option<&Path>) -> anyhow::Result<()> {
    let catalog = load_catalog(path)?;
    let dishes = dishes.map(load_dishes).transpose()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let value = match &dishes {
            Some(dishes) => serde_json::json!({ "catalog": catalog, "dishes": dishes }),
            None => serde_json::to_value(&catalog)?,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
    } else {
        print_menu(&catalog, &mut out)?;
        if let Some(dishes) = &dishes {
            writeln!(out)?;
            print_dishes(dishes, &mut out)?;
        }
    }
    Ok(())
}

/// Dish list grouped by food category
pub fn print_dishes<W: Write>(dishes: &DishList, out: &mut W) -> io::Result<()> {
    for (section, entries) in dishes.sections() {
        writeln!(out, "{}:", section)?;
        if entries.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for dish in entries {
            writeln!(out, "  {}", dish.listing())?;
        }
    }
    Ok(())
}

/// The seed dish for a new session: a seed file, a dish picked from the
/// dish list, or nothing.
pub fn resolve_seed(options: &ComposeOptions) -> anyhow::Result<Option<SeedDish>> {
    if let Some(path) = &options.seed {
        let seed = SeedDish::load(path)
            .with_context(|| format!("Failed to load seed dish {}", path.display()))?;
        return Ok(Some(seed));
    }
    match (&options.dishes, &options.dish) {
        (Some(path), Some(key)) => {
            let dishes = load_dishes(path)?;
            let dish = dishes
                .find(key)
                .ok_or_else(|| anyhow!("No dish '{}' in {}", key, path.display()))?;
            Ok(Some(dish.seed.clone()))
        }
        (None, Some(_)) => bail!("--dish needs a dish list (--dishes)"),
        _ => Ok(None),
    }
}

pub fn print_menu<W: Write>(catalog: &MenuCatalog, out: &mut W) -> io::Result<()> {
    for category in catalog.categories() {
        let subcategories = catalog.subcategories(category);
        if subcategories.is_empty() {
            writeln!(out, "{}: {}", category, catalog.items(category, None).join(", "))?;
            writeln!(out, "  methods: {}", catalog.methods(category, None).join(", "))?;
            continue;
        }
        writeln!(out, "{}:", category)?;
        for sub in subcategories {
            writeln!(
                out,
                "  {}: {} ({})",
                sub,
                catalog.items(category, Some(sub)).join(", "),
                catalog.methods(category, Some(sub)).join(", ")
            )?;
        }
    }
    writeln!(out, "Temperatures: {}", catalog.temperatures().join(", "))
}

/// Compose a plate from stdin or a script file.
pub fn compose(options: ComposeOptions) -> anyhow::Result<()> {
    let catalog = load_catalog(options.menu.as_deref())?;
    let session = match resolve_seed(&options)? {
        Some(seed) => {
            info!("Starting from seed dish {}", seed.name);
            PlateSession::with_seed(catalog, seed)?
        }
        None => PlateSession::new(catalog),
    };

    let user_id = options.user.or_else(config::user_id_from_env);
    if user_id.is_none() {
        warn!("No user id set, orders will be sent anonymously");
    }

    let submitter: Box<dyn OrderSubmitter> = if options.dry_run {
        Box::new(MockSubmitter::new())
    } else {
        let config = SubmitConfig::from_env()?.with_overrides(options.endpoint, options.timeout_ms)?;
        info!("Orders go to {}", config.endpoint);
        Box::new(HttpOrderSubmitter::new(config))
    };

    let mut runner = Runner::new(session, submitter.as_ref(), user_id).echo_orders(options.dry_run);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &options.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            runner.run(BufReader::new(file), &mut out)
        }
        None => {
            writeln!(out, "{}", runner.session().view())?;
            writeln!(out, "Type 'help' for commands.")?;
            runner.run(io::stdin().lock(), &mut out)
        }
    }
}
