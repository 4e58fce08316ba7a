#![allow(dead_code)]

use std::{
    collections::VecDeque,
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
};

use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;

use runform_lib::{
    analysis::{AnalysisController, AnalysisListener, AnalysisSnapshot, AnalysisStatus},
    gemini::{AnalysisClient, GenerateContentRequest, GenerateContentResponse, ModelTransport},
    history::{FileStore, History, ResultStore},
    models::{AnalysisResult, FootStrike, FormObservation, SkillLevel, StepMetrics},
    settings::SettingsStore,
};

pub fn example_payload() -> Value {
    json!({
        "overallScore": 82,
        "metrics": {
            "cadence": 180,
            "strideLength": 1.1,
            "groundContactTime": 220,
            "verticalOscillation": 8,
            "flightTime": 130
        },
        "footStrike": "Midfoot",
        "observations": [
            { "joint": "Hip", "finding": "Stable pelvis", "score": 85, "advice": "Keep it up" },
            { "joint": "Arm swing", "finding": "Crosses midline", "score": 64, "advice": "Swing front to back" }
        ],
        "summary": "Solid midfoot runner with room to tidy the arm swing.",
        "trainingSteps": ["Arm swing drill", "Strides x6", "Core circuit"]
    })
}

/// Replays queued outcomes in order and records every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<GenerateContentResponse, String>>>,
    requests: Mutex<Vec<GenerateContentRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.outcomes
            .lock()
            .unwrap()
            .push_back(Ok(GenerateContentResponse::from_text(text)));
    }

    pub fn push_response(&self, response: GenerateContentResponse) {
        self.outcomes.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, message: impl Into<String>) {
        self.outcomes.lock().unwrap().push_back(Err(message.into()));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<GenerateContentRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl ModelTransport for ScriptedTransport {
    fn generate_content(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.outcomes.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Err(anyhow!("no scripted response left")),
        }
    }
}

/// Blocks each call until the test sends on the paired channel.
pub struct GatedTransport {
    gate: Mutex<mpsc::Receiver<()>>,
    text: String,
}

impl GatedTransport {
    pub fn new(text: impl Into<String>) -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                gate: Mutex::new(rx),
                text: text.into(),
            },
            tx,
        )
    }
}

impl ModelTransport for GatedTransport {
    fn generate_content(&self, _request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        self.gate
            .lock()
            .unwrap()
            .recv()
            .map_err(|_| anyhow!("gate closed"))?;
        Ok(GenerateContentResponse::from_text(self.text.clone()))
    }
}

#[derive(Default)]
pub struct RecordingListener {
    pub statuses: Mutex<Vec<AnalysisStatus>>,
    pub history_lengths: Mutex<Vec<usize>>,
}

impl AnalysisListener for RecordingListener {
    fn state_changed(&self, snapshot: &AnalysisSnapshot) {
        self.statuses.lock().unwrap().push(snapshot.state.status);
    }

    fn history_changed(&self, history: &[AnalysisResult]) {
        self.history_lengths.lock().unwrap().push(history.len());
    }
}

pub struct Harness {
    pub dir: TempDir,
    pub controller: AnalysisController,
    pub listener: Arc<RecordingListener>,
}

impl Harness {
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let listener = Arc::new(RecordingListener::default());
        let controller = build_controller(dir.path(), transport, listener.clone());
        Self {
            dir,
            controller,
            listener,
        }
    }

    pub fn write_video(&self, name: &str) -> String {
        let path = self.dir.path().join("videos").join(name);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("create videos dir");
        std::fs::write(&path, b"\x00\x00\x00\x18ftypmp42fake-video-bytes").expect("write video");
        path.to_string_lossy().into_owned()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }
}

pub fn build_controller(
    root: &Path,
    transport: Arc<dyn ModelTransport>,
    listener: Arc<dyn AnalysisListener>,
) -> AnalysisController {
    let data_dir = root.join("data");
    let settings = Arc::new(SettingsStore::new(root.join("settings.json")).expect("settings store"));
    let storage = Arc::new(FileStore::new(data_dir).expect("file store"));
    let history = History::load(ResultStore::new(storage));
    AnalysisController::new(AnalysisClient::new(transport), history, settings, listener)
}

pub fn sample_result(id: &str, minute: u32) -> AnalysisResult {
    AnalysisResult {
        id: id.into(),
        timestamp: Utc
            .with_ymd_and_hms(2026, 3, 14, 7, minute, 9)
            .single()
            .expect("valid timestamp"),
        overall_score: 77.5,
        metrics: StepMetrics {
            cadence: 172.4,
            stride_length: 1.234,
            ground_contact_time: 251.0,
            vertical_oscillation: 9.7,
            flight_time: 98.3,
        },
        observations: vec![FormObservation {
            joint: "膝".into(),
            finding: "着地時にやや伸びすぎ".into(),
            score: 68.0,
            advice: "重心の真下で着地する".into(),
        }],
        foot_strike: FootStrike::Heel,
        summary: "Overstriding at easy pace.".into(),
        training_steps: vec!["Cadence +5%".into(), "A-skips".into()],
        target_pace: "5:30".into(),
        runner_description: "blue cap".into(),
        level: Some(SkillLevel::Beginner),
    }
}
