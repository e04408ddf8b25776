//! App package command - Print the stack template of an application.
//!
//! The command runs in three steps: `ask` fills in any missing application or
//! environment name interactively, `validate` checks the names against the
//! workspace and the environment store, and `execute` renders the stack
//! template and its parameter document and writes them out.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::Args;
use tracing::{debug, info};

use archer_deploy::{
    stack_for, BundledTemplates, ListenerRule, StackConfiguration, StackInput, TemplateStore,
};
use archer_manifest::decode;
use archer_store::{
    Environment, EnvironmentStore, FileEnvironmentStore, FsWorkspace, ProjectContext, Workspace,
};

use crate::commands::GlobalArgs;
use crate::error::PackageError;
use crate::prompt::{Prompter, TermPrompter};

const APP_NAME_PROMPT: &str = "Which application would you like to generate a CloudFormation template for?";
const ENV_NAME_PROMPT: &str = "Which environment would you like to create this stack for?";

/// Tag used when the image tag cannot be derived from git.
pub const FALLBACK_IMAGE_TAG: &str = "latest";

#[derive(Args, Debug, Clone, Default)]
#[command(after_help = r#"Examples:
  Print the CloudFormation template for the "frontend" application parametrized for the "test" environment.
  $ archer app package -n frontend -e test

  Write the CloudFormation stack and configuration to a "infrastructure/" sub-directory instead of printing.
  $ archer app package -n frontend -e test --output-dir ./infrastructure
  $ ls ./infrastructure
  frontend.stack.yml      frontend-test.params.json"#)]
pub struct PackageAppArgs {
    /// Name of the application
    #[arg(short = 'n', long = "name")]
    pub app_name: Option<String>,

    /// Name of the environment
    #[arg(short = 'e', long = "env")]
    pub env_name: Option<String>,

    /// Optional. The application's image tag. Defaults to your latest git commit's hash
    #[arg(long)]
    pub tag: Option<String>,

    /// Optional. Writes the stack template and template configuration to a directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Inputs and collaborators of one packaging run.
pub struct PackageAppOpts<'a> {
    pub app_name: Option<String>,
    pub env_name: Option<String>,
    pub tag: String,
    pub output_dir: Option<PathBuf>,

    project: ProjectContext,
    ws: &'a dyn Workspace,
    env_store: &'a dyn EnvironmentStore,
    prompt: &'a dyn Prompter,
    templates: &'a dyn TemplateStore,
}

impl<'a> PackageAppOpts<'a> {
    pub fn new(
        args: PackageAppArgs,
        project: ProjectContext,
        ws: &'a dyn Workspace,
        env_store: &'a dyn EnvironmentStore,
        prompt: &'a dyn Prompter,
        templates: &'a dyn TemplateStore,
    ) -> Self {
        Self {
            app_name: args.app_name.filter(|n| !n.is_empty()),
            env_name: args.env_name.filter(|n| !n.is_empty()),
            tag: args.tag.unwrap_or_else(default_image_tag),
            output_dir: args.output_dir,
            project,
            ws,
            env_store,
            prompt,
            templates,
        }
    }

    /// Validate what was given on the command line, prompt for the rest,
    /// validate again, and write the stack out.
    pub fn run(&mut self, out: &mut dyn Write) -> Result<()> {
        self.validate()?;
        self.ask()?;
        self.validate()?;
        self.execute(out)
    }

    /// Prompt the user for any missing application or environment name.
    pub fn ask(&mut self) -> Result<()> {
        if self.app_name.is_none() {
            let names = self.list_app_names()?;
            if names.is_empty() {
                return Err(PackageError::NoApplicationsFound.into());
            }
            let app = self
                .prompt
                .select_one(APP_NAME_PROMPT, "", &names)
                .context("prompt application name")?;
            self.app_name = Some(app);
        }

        if self.env_name.is_none() {
            let project = self.project_name()?;
            let names = self.list_env_names(project)?;
            if names.is_empty() {
                return Err(PackageError::NoEnvironmentsFound(project.to_string()).into());
            }
            let env = self
                .prompt
                .select_one(ENV_NAME_PROMPT, "", &names)
                .context("prompt environment name")?;
            self.env_name = Some(env);
        }

        Ok(())
    }

    /// Check the names provided so far.
    pub fn validate(&self) -> Result<()> {
        let project = self.project_name()?;

        if let Some(app) = &self.app_name {
            let names = self.list_app_names()?;
            if !names.contains(app) {
                return Err(PackageError::UnknownApplication(app.clone()).into());
            }
        }

        if let Some(env) = &self.env_name {
            self.env_store
                .get_environment(project, env)
                .with_context(|| format!("get environment {} in project {}", env, project))?;
        }

        Ok(())
    }

    /// Render the stack template and parameter document and write them to
    /// the output directory, or the template alone to `out`.
    pub fn execute(&self, out: &mut dyn Write) -> Result<()> {
        let project = self.project_name()?;
        let app_name = self
            .app_name
            .as_deref()
            .ok_or(PackageError::MissingInput("application name"))?;
        let env_name = self
            .env_name
            .as_deref()
            .ok_or(PackageError::MissingInput("environment name"))?;

        let env = self
            .env_store
            .get_environment(project, env_name)
            .with_context(|| format!("get environment {} in project {}", env_name, project))?;

        if self.output_dir.is_some() {
            check_file_name_component(app_name)?;
            check_file_name_component(env_name)?;
        }

        let (template, params) = self.render(app_name, env)?;

        match &self.output_dir {
            Some(dir) => self.write_files(dir, app_name, env_name, &template, &params),
            None => {
                out.write_all(template.as_bytes())
                    .context("write stack template")?;
                out.flush().context("write stack template")?;
                io::sink()
                    .write_all(params.as_bytes())
                    .context("write stack parameters")?;
                Ok(())
            }
        }
    }

    fn render(&self, app_name: &str, env: Environment) -> Result<(String, String)> {
        let path = self.ws.manifest_file_name(app_name);
        let raw = self
            .ws
            .read_manifest_file(&path)
            .with_context(|| format!("read manifest for application {}", app_name))?;
        let manifest = decode(&raw)
            .with_context(|| format!("decode manifest for application {}", app_name))?;

        let other_rules = self
            .other_rules(app_name, &env.name)
            .context("allocate listener rule priority")?;
        let input = StackInput::new(manifest, env, self.tag.clone()).with_other_rules(other_rules);
        let app_type = input.manifest.app_type();
        let stack = stack_for(&input, self.templates);

        info!(
            "Packaging application {} for environment {} as stack {}",
            app_name,
            input.environment.name,
            stack.stack_name()
        );

        let template = stack
            .template()
            .with_context(|| format!("execute CloudFormation template for {}", app_type))?;
        let params = stack
            .serialized_parameters()
            .with_context(|| format!("execute stack configuration for {}", app_type))?;

        Ok((template, params))
    }

    /// Listener rules the other applications of the workspace claim in
    /// `env_name`.
    fn other_rules(&self, app_name: &str, env_name: &str) -> Result<Vec<ListenerRule>> {
        let names = self.list_app_names()?;

        names
            .iter()
            .filter(|name| name.as_str() != app_name)
            .map(|name| {
                let path = self.ws.manifest_file_name(name);
                let raw = self
                    .ws
                    .read_manifest_file(&path)
                    .with_context(|| format!("read manifest for application {}", name))?;
                let manifest = decode(&raw)
                    .with_context(|| format!("decode manifest for application {}", name))?;
                Ok(ListenerRule::new(name.as_str(), manifest.rule_path(env_name)))
            })
            .collect()
    }

    fn write_files(
        &self,
        dir: &Path,
        app_name: &str,
        env_name: &str,
        template: &str,
        params: &str,
    ) -> Result<()> {
        fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;

        let template_path = dir.join(format!("{}.stack.yml", app_name));
        write_file(&template_path, template)?;

        let params_path = dir.join(format!("{}-{}.params.json", app_name, env_name));
        write_file(&params_path, params)?;

        info!(
            "Wrote {} and {}",
            template_path.display(),
            params_path.display()
        );
        Ok(())
    }

    fn project_name(&self) -> Result<&str> {
        self.project
            .name()
            .ok_or_else(|| PackageError::NoProjectInWorkspace.into())
    }

    fn list_app_names(&self) -> Result<Vec<String>> {
        self.ws
            .app_names()
            .context("list applications in workspace")
    }

    fn list_env_names(&self, project: &str) -> Result<Vec<String>> {
        let envs = self
            .env_store
            .list_environments(project)
            .with_context(|| format!("list environments for project {}", project))?;
        Ok(envs.into_iter().map(|e| e.name).collect())
    }
}

/// Names become part of output file names and must not leave the output
/// directory.
fn check_file_name_component(name: &str) -> Result<()> {
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(PackageError::InvalidFileName(name.to_string()).into());
    }
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create file {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("write file {}", path.display()))?;
    file.flush()
        .with_context(|| format!("write file {}", path.display()))?;
    debug!("Wrote {}", path.display());
    Ok(())
}

/// Image tag `manual-{short commit}` of the current git checkout, or
/// [`FALLBACK_IMAGE_TAG`] when git is unavailable or fails.
pub fn default_image_tag() -> String {
    match Command::new("git").args(["rev-parse", "--short", "HEAD"]).output() {
        Ok(output) if output.status.success() => {
            let commit = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if commit.is_empty() {
                FALLBACK_IMAGE_TAG.to_string()
            } else {
                format!("manual-{}", commit)
            }
        }
        _ => {
            debug!("Could not read git commit, tagging image {}", FALLBACK_IMAGE_TAG);
            FALLBACK_IMAGE_TAG.to_string()
        }
    }
}

/// Entry point of `archer app package`.
pub fn execute(args: PackageAppArgs, global: &GlobalArgs) -> Result<()> {
    let current_dir = std::env::current_dir().context("read current directory")?;
    let ws = FsWorkspace::discover(&current_dir).context("new workspace")?;
    let project = ProjectContext::resolve(global.project.clone(), &ws)
        .context("read workspace summary")?;

    let store_dir = global
        .store_dir
        .clone()
        .unwrap_or_else(|| ws.root_path().join(".archer"));
    let env_store = FileEnvironmentStore::new(store_dir);
    let prompt = TermPrompter::new();
    let templates = BundledTemplates::new();

    let mut opts = PackageAppOpts::new(args, project, &ws, &env_store, &prompt, &templates);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    opts.run(&mut out)
}
