// ============================================================
// Layer 6 — External Parser Command
// ============================================================
// Runs a dependency parser as a child process for each call:
//
//   <program> <args...> -annotators tokenize,ssplit,... -outputFormat conllu
//
// The question text is written to stdin; CoNLL-U is read from
// stdout. The annotator chain is fixed and always appended, so
// callers can pass classpath or model flags but cannot change
// what runs.
//
// The program is resolved once at construction so a missing
// binary fails early instead of on the first question.

use std::{
    env,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use anyhow::{bail, Context, Result};

use crate::data::conllu::parse_conllu;
use crate::domain::{
    dependency::DependencyGraph,
    traits::{TextAnnotator, ANNOTATORS},
};

pub struct CommandAnnotator {
    program: PathBuf,
    args:    Vec<String>,
}

impl CommandAnnotator {
    pub fn new(program: impl AsRef<Path>, args: Vec<String>) -> Result<Self> {
        let program = resolve_program(program.as_ref())?;
        tracing::info!(
            "Using external parser '{}' with annotators {}",
            program.display(),
            ANNOTATORS.join(",")
        );
        Ok(Self { program, args })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("-annotators")
            .arg(ANNOTATORS.join(","))
            .arg("-outputFormat")
            .arg("conllu")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl TextAnnotator for CommandAnnotator {
    fn annotate(&self, text: &str) -> Result<Vec<DependencyGraph>> {
        let mut child = self
            .command()
            .spawn()
            .with_context(|| format!("Cannot start parser '{}'", self.program.display()))?;

        // A parser that exits early closes its stdin; keep the write
        // error until we know how the process itself ended.
        let write_result = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None            => Ok(()),
        };

        let output = child
            .wait_with_output()
            .with_context(|| format!("Parser '{}' did not finish", self.program.display()))?;

        if !output.status.success() {
            bail!(
                "Parser '{}' exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        write_result.with_context(|| "Cannot write question to parser stdin")?;

        let stdout = String::from_utf8(output.stdout)
            .with_context(|| "Parser output is not valid UTF-8")?;
        let graphs = parse_conllu(&stdout)
            .with_context(|| format!("Parser '{}' produced invalid CoNLL-U", self.program.display()))?;

        tracing::debug!("Parser returned {} sentence(s)", graphs.len());
        Ok(graphs)
    }
}

/// Find `program` on disk: as given if it has a directory part,
/// otherwise in each `PATH` entry.
fn resolve_program(program: &Path) -> Result<PathBuf> {
    if program.components().count() > 1 {
        if program.is_file() {
            return Ok(program.to_path_buf());
        }
        bail!("Parser program '{}' does not exist", program.display());
    }

    let search = env::var_os("PATH").unwrap_or_default();
    env::split_paths(&search)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
        .with_context(|| format!("Parser program '{}' not found on PATH", program.display()))
}
