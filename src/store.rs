//! # Context Store
//!
//! Owns the in-memory context map and the durable file behind it.
//!
//! ## Overview
//!
//! [`ContextStore`] wraps a loaded [`Config`] together with its save path.
//! Every mutating operation (switch, execute, add, remove) persists before
//! returning; persistence errors propagate to the caller and the in-memory
//! change is deliberately not rolled back. Lookup errors abort the requested
//! operation without mutating anything.
//!
//! Execution failures are data, not errors: a job that runs and fails is
//! recorded as a non-success [`ExecutionResult`], and an activation command
//! that fails does not block the switch (see [`ActivationStatus`]).

use crate::config::{Config, ConfigError, Context, ExecutionResult};
use crate::exec::{run_captured, run_interactive, ExecError};
use chrono::Utc;
use std::path::PathBuf;
use thiserror::Error;

/// Command role executed by [`ContextStore::execute_job`].
pub const RUN_ROLE: &str = "run";
/// Preferred command role for [`ContextStore::switch`]; falls back to
/// [`RUN_ROLE`] when absent.
pub const ACTIVATE_ROLE: &str = "activate";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("context '{0}' not found")]
    NotFound(String),
    #[error("context '{0}' has no run command")]
    NoRunCommand(String),
    #[error("failed to persist configuration: {0}")]
    Persistence(#[from] ConfigError),
}

/// How the activation command of a [`ContextStore::switch`] call ended. The
/// switch itself commits in every case; callers decide how loudly to report
/// a failed activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationStatus {
    /// The context defines no activation command.
    NoCommand,
    /// The command ran and exited with this code.
    Exited(i32),
    /// The command could not be started.
    LaunchFailed(String),
}

pub struct ContextStore {
    config: Config,
    path: PathBuf,
}

impl ContextStore {
    /// Load the store from the default config path.
    pub fn open() -> Result<Self, ConfigError> {
        Self::open_at(Config::default_path()?)
    }

    /// Load the store from a specific path (missing file = empty store).
    pub fn open_at(path: PathBuf) -> Result<Self, ConfigError> {
        let config = Config::load_from(&path)?;
        Ok(Self { config, path })
    }

    /// Build a store around an already-constructed config.
    pub fn with_config(config: Config, path: PathBuf) -> Self {
        Self { config, path }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// All contexts ordered by name ascending. The returned snapshot is a
    /// copy; the store keeps ownership of the durable data.
    pub fn list(&self) -> Vec<Context> {
        self.config.contexts.values().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Context> {
        self.config.contexts.get(name)
    }

    /// The active context, or `None` when unset or when the recorded name no
    /// longer exists (a dangling pointer is tolerated, not an error).
    pub fn current(&self) -> Option<&Context> {
        if self.config.current_context.is_empty() {
            return None;
        }
        self.config.contexts.get(&self.config.current_context)
    }

    pub fn current_name(&self) -> &str {
        &self.config.current_context
    }

    /// Make `name` the active context.
    ///
    /// Runs the activation command (role `activate`, falling back to `run`)
    /// with interactive passthrough when one is defined. The switch commits
    /// and persists regardless of how that command ends; its outcome is
    /// returned so the caller can report it.
    pub fn switch(&mut self, name: &str) -> Result<ActivationStatus, StoreError> {
        let context = self
            .config
            .contexts
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let command = context
            .commands
            .get(ACTIVATE_ROLE)
            .or_else(|| context.commands.get(RUN_ROLE))
            .cloned();

        let status = match command {
            None => ActivationStatus::NoCommand,
            Some(command) => match run_interactive(&command, &context.variables) {
                Ok(code) => ActivationStatus::Exited(code),
                Err(ExecError::Launch(err)) => ActivationStatus::LaunchFailed(err.to_string()),
            },
        };

        self.config.current_context = name.to_string();
        self.persist()?;
        Ok(status)
    }

    /// Run the context's `run` command with captured output and record the
    /// outcome on the context.
    ///
    /// The result is returned to the caller whether or not the command
    /// succeeded; only lookup and persistence problems are errors.
    pub fn execute_job(&mut self, name: &str) -> Result<ExecutionResult, StoreError> {
        let context = self
            .config
            .contexts
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))?;

        let command = context
            .commands
            .get(RUN_ROLE)
            .cloned()
            .ok_or_else(|| StoreError::NoRunCommand(name.to_string()))?;

        let report = run_captured(&command, &context.variables);
        let result = ExecutionResult {
            timestamp: Utc::now(),
            success: report.success(),
            exit_code: report.exit_code(),
            output: report.report,
        };
        context.last_result = Some(result.clone());

        self.persist()?;
        Ok(result)
    }

    /// Insert or overwrite a context keyed by its name.
    pub fn add(&mut self, context: Context) -> Result<(), StoreError> {
        self.config
            .contexts
            .insert(context.name.clone(), context);
        self.persist()
    }

    /// Delete a context; clears the current pointer when it was active.
    pub fn remove(&mut self, name: &str) -> Result<(), StoreError> {
        if self.config.contexts.remove(name).is_none() {
            return Err(StoreError::NotFound(name.to_string()));
        }
        if self.config.current_context == name {
            self.config.current_context.clear();
        }
        self.persist()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.config.save_to(&self.path)?;
        Ok(())
    }
}
