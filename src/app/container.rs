use std::sync::Arc;

use crate::adapters::{ExtractiveSummaryAdapter, FsLocalAdapter};
use crate::app::{
    convert_interactor::ConvertInteractor, highlight_interactor::HighlightInteractor,
    inspect_interactor::InspectInteractor,
};
use crate::domain::model::HighlightConfig;
use crate::ports::{FsPort, SummarizerPort};

pub trait AppContainer: Send + Sync {
    fn highlight_interactor(&self) -> Arc<HighlightInteractor>;
    fn convert_interactor(&self) -> Arc<ConvertInteractor>;
    fn inspect_interactor(&self) -> Arc<InspectInteractor>;
    fn config(&self) -> &HighlightConfig;
}

pub struct DefaultAppContainer {
    config: HighlightConfig,
    highlight_interactor: Arc<HighlightInteractor>,
    convert_interactor: Arc<ConvertInteractor>,
    inspect_interactor: Arc<InspectInteractor>,
}

impl DefaultAppContainer {
    pub fn new(config: HighlightConfig) -> Self {
        let fs_port = Arc::new(FsLocalAdapter::new());
        let summarizer = Arc::new(ExtractiveSummaryAdapter::new(config.summary_max_words));

        let highlight_interactor = Arc::new(HighlightInteractor::new(
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
            Arc::clone(&summarizer) as Arc<dyn SummarizerPort>,
        ));

        let convert_interactor = Arc::new(ConvertInteractor::new(
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
        ));

        let inspect_interactor = Arc::new(InspectInteractor::new(
            Arc::clone(&fs_port) as Arc<dyn FsPort>,
        ));

        Self {
            config,
            highlight_interactor,
            convert_interactor,
            inspect_interactor,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn highlight_interactor(&self) -> Arc<HighlightInteractor> {
        Arc::clone(&self.highlight_interactor)
    }

    fn convert_interactor(&self) -> Arc<ConvertInteractor> {
        Arc::clone(&self.convert_interactor)
    }

    fn inspect_interactor(&self) -> Arc<InspectInteractor> {
        Arc::clone(&self.inspect_interactor)
    }

    fn config(&self) -> &HighlightConfig {
        &self.config
    }
}
