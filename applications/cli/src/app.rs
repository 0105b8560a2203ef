//! Soundboard session driven from the command line

use crate::config::CliConfig;
use crate::engine::HeadlessEngine;
use crate::error::{CliError, Result};
use soundboard_catalog::{parse_manifest, CategoryFilter, SortMode, Soundboard, ViewCriteria};
use soundboard_core::{AudioEngine, Locator, Sound, UploadedFile};
use soundboard_playback::{
    AudioActivation, LoadPipeline, LoadReport, PlaybackController, UploadReport,
    ACTIVATION_PROMPT,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One soundboard with its engine, pipeline and controller
pub struct App {
    config: CliConfig,
    board: Soundboard,
    engine: Arc<HeadlessEngine>,
    pipeline: LoadPipeline,
    controller: PlaybackController,
}

impl App {
    /// Build the soundboard from the configured manifest
    ///
    /// A missing or malformed manifest gives an empty soundboard.
    pub async fn start(config: CliConfig) -> Self {
        let engine = Arc::new(HeadlessEngine::new());
        let mut board = Soundboard::new(config.catalog_config());

        let files = read_manifest(&config.manifest_path()).await;
        board.register_manifest(files);
        board.drain_events();

        Self {
            pipeline: LoadPipeline::new(engine.clone()),
            controller: PlaybackController::new(engine.clone()),
            config,
            board,
            engine,
        }
    }

    pub fn board(&self) -> &Soundboard {
        &self.board
    }

    pub fn engine(&self) -> &HeadlessEngine {
        &self.engine
    }

    /// Load every provisioned sound that is still waiting
    pub async fn load(&mut self) -> LoadReport {
        self.pipeline.load_pending(&mut self.board).await
    }

    /// Build view criteria from command-line options
    ///
    /// `category` is a category name or `all`.
    pub fn criteria(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        sort: Option<SortMode>,
    ) -> Result<ViewCriteria> {
        let filter = match category.map(str::trim) {
            None => CategoryFilter::All,
            Some(name) if name.eq_ignore_ascii_case("all") => CategoryFilter::All,
            Some(name) => {
                let category = self
                    .board
                    .categories()
                    .find_by_name(name)
                    .ok_or_else(|| CliError::UnknownCategory(name.to_string()))?;
                CategoryFilter::Only(category.id.clone())
            }
        };

        Ok(ViewCriteria::default()
            .with_filter(filter)
            .with_search(search.unwrap_or_default())
            .with_sort(sort.unwrap_or(self.config.view.sort)))
    }

    /// One line per sound in display order
    pub fn list(&mut self, criteria: ViewCriteria) -> Result<Vec<String>> {
        self.board.set_criteria(criteria)?;
        let categories = self.board.categories();
        Ok(self
            .board
            .projection()
            .into_iter()
            .map(|sound| {
                format!(
                    "{}\t{}\t{}\t{}",
                    sound.name(),
                    sound.color(),
                    categories.name_of(sound.category_id()),
                    sound.phase()
                )
            })
            .collect())
    }

    /// Activate audio, then play the best match for `query`
    ///
    /// An exact (case-insensitive) name wins over a substring match.
    pub async fn play(&mut self, query: &str) -> Result<String> {
        if let AudioActivation::Failed(reason) = self.controller.on_user_gesture().await {
            tracing::warn!("{} ({})", ACTIVATION_PROMPT, reason);
        }
        self.load().await;

        let criteria = ViewCriteria::default().with_search(query.trim());
        let matches = self.board.project_with(&criteria);
        let sound = pick_match(&matches, query)
            .ok_or_else(|| CliError::NoMatch(query.to_string()))?;

        let id = sound.id().clone();
        let name = sound.name().to_string();
        self.controller.play(&self.board, &id)?;
        Ok(format!("Playing {}", name))
    }

    /// Run local files through upload intake and load the accepted ones
    ///
    /// Files are staged with the engine first; rejected files are unstaged
    /// again since they never enter the catalog.
    pub async fn import(&mut self, paths: &[PathBuf]) -> UploadReport {
        let files: Vec<UploadedFile> = paths
            .iter()
            .map(|path| {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let media_type = mime_guess::from_path(path)
                    .first_or_octet_stream()
                    .essence_str()
                    .to_string();
                UploadedFile::new(name, media_type, self.engine.stage_upload(path))
            })
            .collect();
        let mut staged: Vec<(String, Locator)> = files
            .iter()
            .map(|file| (file.name.clone(), file.locator.clone()))
            .collect();

        let report = self.pipeline.load_uploads(&mut self.board, files).await;
        for (file_name, err) in &report.rejected {
            tracing::warn!("Skipped {}: {}", file_name, err);
            if let Some(index) = staged.iter().position(|(name, _)| name == file_name) {
                let (_, locator) = staged.swap_remove(index);
                self.engine.release(&locator);
            }
        }
        report
    }

    /// Status line for the current load counts
    pub fn status_line(&self) -> String {
        self.board
            .status()
            .message()
            .unwrap_or_else(|| "Loading sounds...".to_string())
    }
}

fn pick_match<'a>(matches: &[&'a Sound], query: &str) -> Option<&'a Sound> {
    let query = query.trim();
    matches
        .iter()
        .find(|sound| sound.name().eq_ignore_ascii_case(query))
        .or_else(|| matches.first())
        .copied()
}

async fn read_manifest(path: &Path) -> Vec<String> {
    let json = match tokio::fs::read_to_string(path).await {
        Ok(json) => json,
        Err(err) => {
            tracing::warn!("Could not read manifest {}: {}", path.display(), err);
            return Vec::new();
        }
    };

    match parse_manifest(&json) {
        Ok(files) => {
            tracing::info!("Manifest lists {} sound(s)", files.len());
            files
        }
        Err(err) => {
            tracing::warn!("Ignoring manifest {}: {}", path.display(), err);
            Vec::new()
        }
    }
}
