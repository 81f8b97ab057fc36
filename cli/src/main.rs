use std::io::{BufRead, Read, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use monster_fighter_advisor::{
    ChatSession, GeminiGateway, LlmGateway, MonsterStats, build_system_prompt, explain_monster,
    explain_rules, explain_spell, story_hook,
};
use monster_fighter_core::{
    AbilityGroup, Alignment, CharacterBuild, ClassSheet, Morality, Order, ParsedChoice, RaceSheet,
};
use monster_fighter_equipment::parse_equipment_choices;
use monster_fighter_reference::{
    FighterConfig, HttpReferenceClient, ReferenceSource, index_for_name, load_class_sheet,
    load_race_sheet, monster_ability_averages,
};

const EXIT_WORDS: [&str; 3] = ["q", "quit", "exit"];

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "monster-fighter")]
#[command(about = "D&D 5e character building, monster stats and LLM-backed advice")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Path to a YAML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the reference API root from the config.
    #[arg(long, global = true)]
    base_url: Option<String>,
    /// Bypass the on-disk response cache.
    #[arg(long, global = true)]
    no_cache: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse starting-equipment choice descriptions offline.
    ParseEquipment(ParseEquipmentArgs),
    /// List playable races.
    Races,
    /// List classes.
    Classes,
    /// List monsters.
    Monsters,
    /// Show a race sheet.
    Race(SheetArgs),
    /// Show a class sheet, including parsed equipment choices.
    Class(SheetArgs),
    /// Assemble a character and print its summary.
    Build(BuildArgs),
    /// Average ability scores over a sample of monsters.
    Averages(AveragesArgs),
    /// Ask a rules question.
    Ask(AskArgs),
    /// Explain a spell in plain language.
    ExplainSpell(IndexArgs),
    /// Describe a monster and how to fight it.
    ExplainMonster(IndexArgs),
    /// Generate a story hook for a character.
    Story(StoryArgs),
    /// Chat about selected monsters (reads messages from stdin).
    Chat(ChatArgs),
}

#[derive(Debug, Args)]
struct ParseEquipmentArgs {
    /// Descriptions such as "(a) a mace or (b) a warhammer".
    descriptions: Vec<String>,
    /// Read descriptions from stdin, one per line.
    #[arg(long, conflicts_with = "descriptions")]
    stdin: bool,
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct SheetArgs {
    /// Display name or index (e.g. "Half-Elf", "half-elf").
    name: String,
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct BuildArgs {
    #[arg(long)]
    race: String,
    #[arg(long)]
    class: String,
    #[arg(long)]
    subrace: Option<String>,
    #[arg(long)]
    subclass: Option<String>,
    /// Skill proficiency; repeat for each selection.
    #[arg(long = "proficiency")]
    proficiencies: Vec<String>,
    /// Equipment option label, assigned in order to the class's choices.
    #[arg(long = "equipment")]
    equipment: Vec<String>,
    /// lawful, neutral or chaotic.
    #[arg(long)]
    order: Order,
    /// good, neutral or evil.
    #[arg(long)]
    morality: Morality,
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct AveragesArgs {
    /// all, physical or mental.
    #[arg(long, default_value = "all")]
    group: AbilityGroup,
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct AskArgs {
    /// The question, e.g. "How does advantage work?".
    #[arg(required = true)]
    question: Vec<String>,
}

#[derive(Debug, Args)]
struct IndexArgs {
    /// Name or index (e.g. "fireball", "Adult Red Dragon").
    name: String,
}

#[derive(Debug, Args)]
struct StoryArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    race: String,
    #[arg(long)]
    class: String,
}

#[derive(Debug, Args)]
struct ChatArgs {
    /// Monster to ground the chat in; repeat for several.
    #[arg(long = "monster", required = true)]
    monsters: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = load_config(&cli).and_then(|config| match cli.command {
        Command::ParseEquipment(args) => run_parse_equipment(args),
        Command::Races => run_list(&config, |source| source.list_races()),
        Command::Classes => run_list(&config, |source| source.list_classes()),
        Command::Monsters => run_list(&config, |source| source.list_monsters()),
        Command::Race(args) => run_race(&config, args),
        Command::Class(args) => run_class(&config, args),
        Command::Build(args) => run_build(&config, args),
        Command::Averages(args) => run_averages(&config, args),
        Command::Ask(args) => run_ask(&config, args),
        Command::ExplainSpell(args) => run_explain_spell(&config, args),
        Command::ExplainMonster(args) => run_explain_monster(&config, args),
        Command::Story(args) => run_story(&config, args),
        Command::Chat(args) => run_chat(&config, args),
    });

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<FighterConfig, String> {
    let mut config = match &cli.config {
        Some(path) => FighterConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => FighterConfig::load_or_default(FighterConfig::default_path().as_deref())
            .map_err(|err| err.to_string())?,
    };
    if let Some(base_url) = &cli.base_url {
        config.reference.base_url = base_url.clone();
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }
    config.validate().map_err(|err| err.to_string())?;
    debug!(
        base_url = %config.reference.base_url,
        cache = config.cache.enabled,
        "Configuration loaded"
    );
    Ok(config)
}

fn reference_client(config: &FighterConfig) -> Result<HttpReferenceClient, String> {
    HttpReferenceClient::from_config(config).map_err(|err| err.to_string())
}

fn gateway(config: &FighterConfig) -> Result<GeminiGateway, String> {
    let gateway = GeminiGateway::from_config(&config.llm).map_err(|err| err.to_string())?;
    info!(model = gateway.model(), "LLM gateway ready");
    Ok(gateway)
}

fn run_parse_equipment(args: ParseEquipmentArgs) -> Result<(), String> {
    let descriptions: Vec<String> = if args.stdin {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|err| format!("Failed to read stdin: {err}"))?;
        raw.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        args.descriptions
    };
    if descriptions.is_empty() {
        return Err("Provide at least one description or use --stdin".to_string());
    }

    let choices = parse_equipment_choices(descriptions.iter().map(String::as_str))
        .map_err(|err| err.to_string())?;

    emit(&choices, args.format, || {
        choices.iter().map(|choice| format_choice(choice, None)).collect()
    })
}

fn run_list<F>(config: &FighterConfig, list: F) -> Result<(), String>
where
    F: FnOnce(&HttpReferenceClient) -> monster_fighter_reference::Result<
        Vec<monster_fighter_reference::ApiReference>,
    >,
{
    let client = reference_client(config)?;
    let entries = list(&client).map_err(|err| err.to_string())?;
    for entry in entries {
        println!("{}", entry.name);
    }
    Ok(())
}

fn run_race(config: &FighterConfig, args: SheetArgs) -> Result<(), String> {
    let client = reference_client(config)?;
    let sheet = load_race_sheet(&client, &args.name).map_err(|err| err.to_string())?;
    emit(&sheet, args.format, || format_race(&sheet))
}

fn run_class(config: &FighterConfig, args: SheetArgs) -> Result<(), String> {
    let client = reference_client(config)?;
    let sheet = load_class_sheet(&client, &args.name).map_err(|err| err.to_string())?;
    emit(&sheet, args.format, || format_class(&sheet))
}

fn run_build(config: &FighterConfig, args: BuildArgs) -> Result<(), String> {
    let client = reference_client(config)?;
    let race = load_race_sheet(&client, &args.race).map_err(|err| err.to_string())?;
    let class = load_class_sheet(&client, &args.class).map_err(|err| err.to_string())?;

    let mut build = CharacterBuild::new().with_race(race);
    if let Some(subrace) = &args.subrace {
        build = build.with_subrace(subrace).map_err(|err| err.to_string())?;
    }
    build = build.with_class(class);
    if let Some(subclass) = &args.subclass {
        build = build.with_subclass(subclass).map_err(|err| err.to_string())?;
    }
    let summary = build
        .with_proficiencies(args.proficiencies)
        .and_then(|build| build.with_equipment_choices(&args.equipment))
        .map(|build| build.with_alignment(Alignment::new(args.order, args.morality)))
        .and_then(|build| build.finalize())
        .map_err(|err| err.to_string())?;

    emit(&summary, args.format, || summary.to_string())
}

fn run_averages(config: &FighterConfig, args: AveragesArgs) -> Result<(), String> {
    let client = reference_client(config)?;
    let averages = monster_ability_averages(&client, &config.sampling)
        .map_err(|err| err.to_string())?
        .filtered(args.group);

    emit(&averages, args.format, || {
        let mut out = format!("Average over {} monsters:\n", averages.sampled);
        for (ability, score) in &averages.scores {
            out.push_str(&format!("{:<13} {score}\n", format!("{ability}:")));
        }
        out
    })
}

fn run_ask(config: &FighterConfig, args: AskArgs) -> Result<(), String> {
    let gateway = gateway(config)?;
    let answer = explain_rules(&gateway, &args.question.join(" ")).map_err(|err| err.to_string())?;
    println!("{answer}");
    Ok(())
}

fn run_explain_spell(config: &FighterConfig, args: IndexArgs) -> Result<(), String> {
    let client = reference_client(config)?;
    let spell = client
        .spell(&index_for_name(&args.name))
        .map_err(|err| err.to_string())?;
    let gateway = gateway(config)?;
    println!("{}", explain_spell(&gateway, &spell).map_err(|err| err.to_string())?);
    Ok(())
}

fn run_explain_monster(config: &FighterConfig, args: IndexArgs) -> Result<(), String> {
    let client = reference_client(config)?;
    let monster = client
        .monster(&index_for_name(&args.name))
        .map_err(|err| err.to_string())?;
    let gateway = gateway(config)?;
    println!("{}", explain_monster(&gateway, &monster).map_err(|err| err.to_string())?);
    Ok(())
}

fn run_story(config: &FighterConfig, args: StoryArgs) -> Result<(), String> {
    let gateway = gateway(config)?;
    let hook =
        story_hook(&gateway, &args.name, &args.race, &args.class).map_err(|err| err.to_string())?;
    println!("{hook}");
    Ok(())
}

fn run_chat(config: &FighterConfig, args: ChatArgs) -> Result<(), String> {
    let client = reference_client(config)?;
    let mut stats = Vec::with_capacity(args.monsters.len());
    for name in &args.monsters {
        let monster = client
            .monster(&index_for_name(name))
            .map_err(|err| format!("Failed to load monster '{name}': {err}"))?;
        stats.push(MonsterStats::from_monster(&monster));
    }

    let gateway = gateway(config)?;
    let system_prompt = build_system_prompt(&stats, config.llm.max_listed_features);
    chat_loop(&gateway, system_prompt, std::io::stdin().lock())
}

fn chat_loop(
    gateway: &dyn LlmGateway,
    system_prompt: String,
    input: impl BufRead,
) -> Result<(), String> {
    let mut session = ChatSession::new(gateway, system_prompt);
    eprintln!("Ask about these monsters (q to quit).");

    for line in input.lines() {
        let line = line.map_err(|err| format!("Failed to read stdin: {err}"))?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if EXIT_WORDS.contains(&message.to_ascii_lowercase().as_str()) {
            break;
        }
        match session.send(message) {
            Ok(reply) => println!("Assistant: {reply}"),
            Err(err) => eprintln!("error: {err} (try again in a moment)"),
        }
        std::io::stdout()
            .flush()
            .map_err(|err| format!("Failed to write stdout: {err}"))?;
    }
    Ok(())
}

/// Prints `value` as JSON or YAML, or the output of `text` for text format.
fn emit<T, F>(value: &T, format: CliOutputFormat, text: F) -> Result<(), String>
where
    T: Serialize,
    F: FnOnce() -> String,
{
    let raw = match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|err| format!("Failed to serialize JSON: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|err| format!("Failed to serialize YAML: {err}"))?,
        CliOutputFormat::Text => text(),
    };
    println!("{}", raw.trim_end());
    Ok(())
}

/// Renders one choice; `label` prefixes the description (e.g. "Choice 2").
fn format_choice(choice: &ParsedChoice, label: Option<&str>) -> String {
    // Granted bundles are listed under their title-cased description.
    let title = match &choice.display_title {
        Some(title) if choice.is_single() => title.as_str(),
        _ => choice.description.as_str(),
    };
    let mut out = match label {
        Some(label) => format!("{label}: {title}\n"),
        None => format!("{title}\n"),
    };
    match choice.auto_selected() {
        Some(item) => out.push_str(&format!("  = {item} (granted)\n")),
        None => {
            for option in &choice.options {
                out.push_str(&format!("  - {option}\n"));
            }
        }
    }
    if choice.ambiguous {
        out.push_str("  ! separators are ambiguous; check the options above\n");
    }
    out
}

fn format_race(sheet: &RaceSheet) -> String {
    let bonuses: Vec<String> = sheet.ability_bonuses.iter().map(ToString::to_string).collect();
    let mut out = format!("{}\n", sheet.name);
    out.push_str(&format!("Ability bonuses: {}\n", or_none(&bonuses)));
    out.push_str(&format!("Traits: {}\n", or_none(&sheet.traits)));
    out.push_str(&format!("Languages: {}\n", or_none(&sheet.languages)));
    match &sheet.subrace {
        Some(subrace) => out.push_str(&format!(
            "Subrace: {}\n  {}\n",
            subrace.name, subrace.description
        )),
        None => out.push_str("Subrace: None\n"),
    }
    out
}

fn format_class(sheet: &ClassSheet) -> String {
    let mut out = format!("{}\n", sheet.name);
    if let Some(choice) = &sheet.proficiency_choice {
        out.push_str(&format!(
            "Skill proficiencies (choose {}): {}\n",
            choice.choose,
            or_none(&choice.options)
        ));
    }
    out.push_str(&format!("Proficiencies: {}\n", or_none(&sheet.proficiencies)));
    out.push_str(&format!(
        "Starting equipment: {}\n",
        or_none(&sheet.fixed_equipment)
    ));

    let mut position = 0;
    for choice in &sheet.equipment_choices {
        if choice.is_single() {
            out.push_str(&format_choice(choice, Some("Granted")));
        } else {
            position += 1;
            out.push_str(&format_choice(choice, Some(&format!("Choice {position}"))));
        }
    }

    match &sheet.subclass {
        Some(subclass) => out.push_str(&format!(
            "Subclass: {}\n  {}\n",
            subclass.name, subclass.description
        )),
        None => out.push_str("Subclass: None\n"),
    }
    out
}

fn or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}
