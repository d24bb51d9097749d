//! Resource scaffold command
//!
//! Generates views, layout assets, stylesheets, controller, helper,
//! functional test and route for a resource:
//!
//! ```bash
//! haml-scaffold admin/post title:string body:text --layout
//! ```

use anyhow::{Context, Result};
use console::{style, StyledObject};
use haml_scaffold::config::ScaffoldConfig;
use haml_scaffold::scaffold::{
    ActionStatus, CollisionPolicy, GenerationOptions, Generator, ManifestAction, Materializer,
    ResourceName, ScaffoldPlanner,
};

use crate::Cli;

/// Width of the right-aligned status column
const STATUS_WIDTH: usize = 12;

/// Plans and writes a scaffold for one resource
pub struct ScaffoldCommand {
    name: String,
    options: GenerationOptions,
    config: ScaffoldConfig,
    pretend: bool,
}

impl ScaffoldCommand {
    /// Command scaffolding `name` with the given options and configuration
    ///
    /// With `pretend` set the plan is printed and nothing is written.
    pub const fn new(
        name: String,
        options: GenerationOptions,
        config: ScaffoldConfig,
        pretend: bool,
    ) -> Self {
        Self {
            name,
            options,
            config,
            pretend,
        }
    }

    /// Build the command from parsed arguments and the layered configuration
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Ok(Self::new(
            cli.name.clone(),
            cli.options(),
            cli.load_config()?,
            cli.pretend,
        ))
    }

    /// Resolve the resource name and plan every action
    pub fn plan(&self) -> Result<Vec<ManifestAction>> {
        let name = ResourceName::resolve(&self.name)
            .with_context(|| format!("Cannot scaffold '{}'", self.name))?;
        ScaffoldPlanner::new(&self.config)
            .plan(&name, &self.options)
            .context("Failed to plan scaffold")
    }

    /// Run the scaffold, or only print the plan with `--pretend`
    pub fn execute(&self) -> Result<()> {
        println!(
            "\n{} {} {}",
            style("Scaffolding").cyan().bold(),
            style(&self.name).green().bold(),
            style("...").cyan().bold()
        );

        let actions = self.plan()?;
        tracing::info!(
            resource = %self.name,
            actions = actions.len(),
            pretend = self.pretend,
            force = self.config.overwrite_existing,
            "running scaffold"
        );

        if self.pretend {
            for action in &actions {
                println!("{} {action}", style(pad(action.verb())).dim());
            }
            println!(
                "\n{} {} actions planned, nothing written",
                style("Pretend:").yellow().bold(),
                actions.len()
            );
            return Ok(());
        }

        let report = Materializer::new(self.config.clone())
            .run(&actions)
            .with_context(|| format!("Failed to scaffold '{}'", self.name))?;
        tracing::debug!(
            written = report.entries.len(),
            deferred = report.deferred.len(),
            "scaffold finished"
        );

        for (action, status) in &report.entries {
            println!("{} {action}", styled_status(*status));
        }

        println!(
            "\n{} scaffold for {} is ready!",
            style("✨").green().bold(),
            style(&self.name).green().bold()
        );

        let follow_ups: Vec<String> = report.deferred.iter().filter_map(dependency_command).collect();
        if !follow_ups.is_empty() {
            println!("\n{}", style("Next steps:").cyan().bold());
            for (idx, command) in follow_ups.iter().enumerate() {
                println!("  {}. Generate the model: {}", idx + 1, style(command).yellow());
            }
        }

        Ok(())
    }
}

/// Shell command running a deferred dependent generator
#[must_use]
pub fn dependency_command(action: &ManifestAction) -> Option<String> {
    let ManifestAction::DeclareDependency {
        generator,
        args,
        collision,
        skip_timestamps,
        skip_migration,
    } = action
    else {
        return None;
    };

    let mut command = format!("script/generate {generator}");
    for arg in args {
        command.push(' ');
        command.push_str(arg);
    }
    if *skip_timestamps {
        command.push_str(" --skip-timestamps");
    }
    if *skip_migration {
        command.push_str(" --skip-migration");
    }
    if *collision == CollisionPolicy::Skip {
        command.push_str(" --skip");
    }
    Some(command)
}

fn pad(word: &str) -> String {
    format!("{word:>STATUS_WIDTH$}")
}

fn styled_status(status: ActionStatus) -> StyledObject<String> {
    let word = style(pad(status.word())).bold();
    match status {
        ActionStatus::Create | ActionStatus::Insert | ActionStatus::Route => word.green(),
        ActionStatus::Overwrite | ActionStatus::Skip => word.yellow(),
        ActionStatus::Deferred => word.cyan(),
        ActionStatus::Checked
        | ActionStatus::Exists
        | ActionStatus::Identical
        | ActionStatus::AlreadyPresent => word.blue(),
    }
}
