pub mod classifier;
pub mod codegen;
pub mod errors;
pub mod normalizer;
pub mod output;

pub use codegen::SceneCodeGenerator;
pub use errors::TranspileError;
pub use output::{FsOutput, MemoryOutput, OutputSink};

use crate::config::Config;
use classifier::{classify, LineKind};
use log::{debug, info, warn};
use normalizer::{normalize_scene_name, SceneRegistry};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptState {
    SearchingForEntryPoint,
    ParsingScript,
}

/// Summary of a successful compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Scene names in document order
    pub scenes: Vec<String>,
    /// Speakers in order of first appearance
    pub characters: Vec<String>,
    /// Every file handed to the output sink, relative to its root
    pub files: Vec<PathBuf>,
}

/// Unique speaker names, in order of first appearance.
#[derive(Debug, Default)]
pub struct CharacterSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl CharacterSet {
    pub fn insert(&mut self, name: &str) -> bool {
        if !self.seen.insert(name.to_string()) {
            return false;
        }

        self.order.push(name.to_string());
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }

    pub fn into_vec(self) -> Vec<String> {
        self.order
    }
}

/// The scene whose class is currently being written.
struct OpenScene {
    name: String,
    code: String,
}

/// One pass over a story script.
///
/// Lines are fed in order; `finish` closes the last scene and writes the
/// transition and dialog helpers. At most one scene is open at any time.
pub struct Transpiler<'a> {
    config: &'a Config,
    output: &'a mut dyn OutputSink,
    codegen: SceneCodeGenerator,
    state: ScriptState,
    done: bool,
    scene: Option<OpenScene>,
    scenes: SceneRegistry,
    characters: CharacterSet,
    files: Vec<PathBuf>,
}

impl<'a> Transpiler<'a> {
    pub fn new(
        config: &'a Config,
        output: &'a mut dyn OutputSink,
    ) -> Result<Self, TranspileError> {
        Ok(Self {
            config,
            output,
            codegen: SceneCodeGenerator::new()?,
            state: ScriptState::SearchingForEntryPoint,
            done: false,
            scene: None,
            scenes: SceneRegistry::new(),
            characters: CharacterSet::default(),
            files: Vec::new(),
        })
    }

    /// True once a level-1 heading has ended the script body.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Reads `reader` until the script ends, then finishes the compilation.
    pub fn run<R: BufRead>(
        mut self,
        reader: R,
        source: &Path,
    ) -> Result<CompileReport, TranspileError> {
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| TranspileError::io(source, e))?;

            // UTF-8 byte order mark
            let line = if index == 0 {
                line.trim_start_matches('\u{feff}')
            } else {
                line.as_str()
            };

            self.process_line(line)?;

            if self.is_done() {
                break;
            }
        }

        self.finish()
    }

    pub fn process_line(&mut self, line: &str) -> Result<(), TranspileError> {
        if self.done {
            return Ok(());
        }

        let kind = classify(line);

        match self.state {
            ScriptState::SearchingForEntryPoint => {
                if let LineKind::Heading1(text) = kind {
                    if self.config.is_entry_point(text) {
                        info!("Found script entry point");
                        self.state = ScriptState::ParsingScript;
                    }
                }
                Ok(())
            }
            ScriptState::ParsingScript => self.process_script_line(kind),
        }
    }

    fn process_script_line(&mut self, kind: LineKind<'_>) -> Result<(), TranspileError> {
        match kind {
            LineKind::Heading2(text) => return self.open_scene(text),
            LineKind::Heading1(text) => {
                debug!("Script ends at heading '{}'", text);
                self.done = true;
                return Ok(());
            }
            _ => {}
        }

        let Some(scene) = self.scene.as_mut() else {
            return Ok(());
        };

        match kind {
            LineKind::Dialogue(line) => {
                if self.characters.insert(&line.speaker) {
                    debug!("New character: {}", line.speaker);
                }
                debug!("[{}] dialogue from {}", scene.name, line.speaker);
                self.codegen.dialogue(&mut scene.code, &line);
            }
            LineKind::Pause => {
                debug!("[{}] pause", scene.name);
                self.codegen.pause(&mut scene.code);
            }
            LineKind::Comment(text) => {
                debug!("[{}] comment", scene.name);
                self.codegen.comment(&mut scene.code, text);
            }
            LineKind::Blank | LineKind::Heading1(_) | LineKind::Heading2(_) => {}
        }

        Ok(())
    }

    fn open_scene(&mut self, heading: &str) -> Result<(), TranspileError> {
        info!("[SCENE] {}", heading);

        self.close_scene()?;

        let name = normalize_scene_name(heading, &self.config.scene_rename_token);

        if name.is_empty() {
            // Lines up to the next usable heading are dropped along with it
            warn!("Skipping scene '{}': heading has no usable characters", heading);
            return Ok(());
        }

        info!("   ---> {}", name);

        self.scenes.register(&name)?;

        let mut code = String::new();
        self.codegen.scene_prologue(&mut code, &name)?;
        self.scene = Some(OpenScene { name, code });

        Ok(())
    }

    fn close_scene(&mut self) -> Result<(), TranspileError> {
        let Some(mut scene) = self.scene.take() else {
            return Ok(());
        };

        self.codegen.scene_epilogue(&mut scene.code);

        let path = self.config.scene_path(&scene.name);
        self.write(path, &scene.code)
    }

    fn write(&mut self, path: PathBuf, contents: &str) -> Result<(), TranspileError> {
        self.output.write_file(&path, contents)?;
        self.files.push(path);
        Ok(())
    }

    /// Closes the open scene and writes the helper classes.
    ///
    /// Fails if the entry point heading was never seen; nothing is written then.
    pub fn finish(mut self) -> Result<CompileReport, TranspileError> {
        if self.state == ScriptState::SearchingForEntryPoint {
            return Err(TranspileError::MissingEntryPoint {
                keyword: self.config.entry_point.clone(),
            });
        }

        self.close_scene()?;

        let transition = self.codegen.transition_helper()?;
        let transition_file = self.config.transition_file.clone();
        info!("Writing {}", transition_file.display());
        self.write(transition_file, &transition)?;

        let dialog = self.codegen.dialog_helper(self.characters.as_slice())?;
        let dialog_file = self.config.dialog_file.clone();
        info!("Writing {}", dialog_file.display());
        self.write(dialog_file, &dialog)?;

        Ok(CompileReport {
            scenes: self.scenes.into_names(),
            characters: self.characters.into_vec(),
            files: self.files,
        })
    }
}

/// Compiles an in-memory story script.
pub fn transpile(
    source: &str,
    config: &Config,
    output: &mut dyn OutputSink,
) -> Result<CompileReport, TranspileError> {
    Transpiler::new(config, output)?.run(source.as_bytes(), Path::new("<source>"))
}

/// Compiles the story script at `input`.
pub fn transpile_file(
    input: &Path,
    config: &Config,
    output: &mut dyn OutputSink,
) -> Result<CompileReport, TranspileError> {
    let file = File::open(input).map_err(|e| TranspileError::io(input, e))?;

    Transpiler::new(config, output)?.run(BufReader::new(file), input)
}
