use anyhow::{Result, Context, anyhow};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};
use indicatif::{ProgressBar, ProgressStyle};
use crate::app_config::Config;
use crate::file_utils::{FileManager, FileType};
use crate::screenplay::{ParsedScript, ScreenplayParser, ScriptStats, ScriptStreams};

// @module: Application controller for script processing

/// Name of the summary log written in folder mode
pub const FOLDER_LOG_FILE: &str = "scenescript.log";

// Suffixes of the stream files, `<stem>_<suffix>.txt`
const STREAM_SUFFIXES: [&str; 2] = ["audio", "imagegen"];

/// Files written for one processed script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// `<stem>.scenes.json`
    pub scenes: PathBuf,
    /// `<stem>_audio.txt`
    pub dialogue: PathBuf,
    /// `<stem>_imagegen.txt`
    pub visuals: PathBuf,
}

/// Outcome of processing a single script file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Outputs were written
    Processed(ScriptStats),
    /// Outputs already existed and overwrite was not forced
    Skipped,
}

/// Counts from a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Main application controller for script processing
pub struct Controller {
    // @field: App configuration
    pub config: Config,

    // @field: Parser built from the configured speakers
    parser: ScreenplayParser,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let parser = config.parser.build_parser()?;
        Ok(Self { config, parser })
    }

    /// Output files for a script, placed in output_dir
    pub fn output_paths(&self, input_file: &Path, output_dir: &Path) -> OutputPaths {
        OutputPaths {
            scenes: FileManager::generate_output_path(input_file, output_dir, "scenes", "json"),
            dialogue: FileManager::generate_stream_path(input_file, output_dir, STREAM_SUFFIXES[0]),
            visuals: FileManager::generate_stream_path(input_file, output_dir, STREAM_SUFFIXES[1]),
        }
    }

    /// Read and parse a script file
    pub async fn parse_file(&self, input_file: &Path) -> Result<ParsedScript> {
        let content = FileManager::read_to_string(input_file)
            .with_context(|| format!("Failed to read script file: {:?}", input_file))?;

        Ok(self.parser.parse(&content))
    }

    /// Load a scene list from either a raw script or a scenes JSON file
    pub async fn load_script(&self, input_file: &Path) -> Result<ParsedScript> {
        match FileManager::detect_file_type(input_file)? {
            FileType::Script => self.parse_file(input_file).await,
            FileType::SceneList => {
                let content = FileManager::read_to_string(input_file)
                    .with_context(|| format!("Failed to read scene list: {:?}", input_file))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse scene list: {:?}", input_file))
            }
            FileType::Unknown => Err(anyhow!("Unsupported input file: {:?}", input_file)),
        }
    }

    /// Compute statistics for a raw script or a scenes JSON file
    pub async fn report_stats(&self, input_file: &Path) -> Result<ScriptStats> {
        let script = self.load_script(input_file).await?;
        Ok(ScriptStats::from_script(&script))
    }

    /// Serialize a scene list according to the output settings
    pub fn serialize_script(&self, script: &ParsedScript) -> Result<String> {
        let json = if self.config.output.pretty_json {
            serde_json::to_string_pretty(script)
        } else {
            serde_json::to_string(script)
        };
        json.context("Failed to serialize scene list")
    }

    /// Run the main workflow with an input script and output directory
    pub async fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<RunStatus> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let paths = self.output_paths(&input_file, &output_dir);
        if FileManager::file_exists(&paths.scenes) && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", input_file);
            return Ok(RunStatus::Skipped);
        }

        FileManager::ensure_dir(&output_dir)?;

        let script = self.parse_file(&input_file).await?;
        if script.scene_count() == 0 {
            warn!("No scene headings found in {:?}", input_file);
        }

        let json = self.serialize_script(&script)?;
        FileManager::write_to_file(&paths.scenes, &json)?;
        debug!("Wrote scene list to {:?}", paths.scenes);

        if self.config.output.write_streams {
            let streams = ScriptStreams::from_script(&script);
            FileManager::write_to_file(&paths.dialogue, &streams.dialogue_text())?;
            FileManager::write_to_file(&paths.visuals, &streams.visuals_text())?;
            debug!(
                "Wrote {} dialogue line(s) and {} visual prompt(s)",
                streams.dialogue.len(),
                streams.visuals.len()
            );
        }

        let stats = ScriptStats::from_script(&script);
        info!(
            "Parsed {:?}: {} scene(s), {} element(s) in {}",
            input_file.file_name().unwrap_or_default(),
            stats.scene_count,
            stats.total_elements(),
            Self::format_duration(start_time.elapsed())
        );

        Ok(RunStatus::Processed(stats))
    }

    /// Stem of the script a stream file would have been written for
    pub fn stream_source_stem(path: &Path) -> Option<String> {
        let stem = path.file_stem()?.to_string_lossy();
        STREAM_SUFFIXES.iter().find_map(|suffix| {
            stem.strip_suffix(&format!("_{}", suffix))
                .filter(|source| !source.is_empty())
                .map(str::to_string)
        })
    }

    /// Whether a path is a stream file written for one of the given scripts.
    ///
    /// `X_audio.txt` only counts as output when `X` itself is among the
    /// scripts in the same directory.
    pub fn is_stream_output(path: &Path, scripts: &[PathBuf]) -> bool {
        let Some(source_stem) = Self::stream_source_stem(path) else {
            return false;
        };

        scripts.iter().any(|script| {
            script.as_path() != path
                && script.parent() == path.parent()
                && script.file_stem().is_some_and(|stem| stem.to_string_lossy() == source_stem)
        })
    }

    // Format duration in a human-readable format
    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;

        if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the workflow in folder mode, processing every script in a directory
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let extension = &self.config.output.script_extension;
        let discovered = FileManager::find_files(&input_dir, extension)?;
        let scripts: Vec<PathBuf> = discovered
            .iter()
            .filter(|path| {
                let is_output = Self::is_stream_output(path, &discovered);
                if is_output {
                    debug!("Not treating stream output {:?} as a script", path);
                }
                !is_output
            })
            .cloned()
            .collect();
        if scripts.is_empty() {
            return Err(anyhow!("No .{} scripts found in directory: {:?}", extension.trim_start_matches('.'), input_dir));
        }

        let folder_pb = ProgressBar::new(scripts.len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} scripts ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(template_result.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing scripts");

        let mut summary = FolderSummary::default();

        for script_file in scripts.iter() {
            let file_name = script_file.file_name()
                .map(|f| f.to_string_lossy().to_string())
                .unwrap_or_else(|| "unknown".to_string());
            folder_pb.set_message(format!("Processing: {}", file_name));

            let output_dir = script_file.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| input_dir.clone());

            match self.run(script_file.clone(), output_dir, force_overwrite).await {
                Ok(RunStatus::Processed(_)) => summary.processed += 1,
                Ok(RunStatus::Skipped) => summary.skipped += 1,
                Err(e) => {
                    error!("Error processing file {}: {}", file_name, e);
                    summary.errors += 1;
                }
            }

            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        let summary_message = format!(
            "Folder processing completed: {} processed, {} skipped, {} errors",
            summary.processed, summary.skipped, summary.errors
        );
        info!("{}", summary_message);

        let log_file_path = input_dir.join(FOLDER_LOG_FILE);
        let log_line = format!(
            "{} - {} - Duration: {}",
            input_dir.display(),
            summary_message,
            Self::format_duration(start_time.elapsed())
        );
        if let Err(e) = FileManager::append_to_log_file(&log_file_path, &log_line) {
            warn!("Failed to write folder summary to {:?}: {}", log_file_path, e);
        }

        Ok(summary)
    }
}
