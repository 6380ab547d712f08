use crate::state::{FilesPane, ViewMode};
use crate::viewer::{self, Resolution, ViewerBody, ViewerContent, ViewerState};
use crate::{
    AppState, ClickTarget, Command, ContentMode, DisplayLanguage, Effect, FileId, FileStatus,
    FormField, Job, JobFile, JobForm, JobId, Key, KeyInput, Msg,
};

pub const LOAD_JOBS_FAILED: &str = "Failed to load jobs. Make sure the server is running.";
pub const CREATE_JOB_FAILED: &str = "Error creating job. Check folder paths.";
pub const DELETE_JOB_FAILED: &str = "Error deleting job.";
pub const UPDATE_STATUS_FAILED: &str = "Error updating file status.";
pub const LOAD_FILES_FAILED: &str = "Failed to load files";

const PAGE_LINES: i32 = 10;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if state.alert.is_some() && is_pointer_or_command(&msg) {
        // The alert is modal; only a key press can dismiss it.
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::NoOp => return (state, Vec::new()),
        Msg::Mounted => request_jobs(&mut state),
        Msg::PollElapsed => poll(&mut state),
        Msg::Key(key) => handle_key(&mut state, key),
        Msg::Command(command) => {
            let enabled = state
                .toolbar()
                .buttons
                .iter()
                .any(|button| button.enabled && button.command == command);
            if enabled {
                run_command(&mut state, command)
            } else {
                Vec::new()
            }
        }
        Msg::JobClicked(job_id) => {
            if state.mode == ViewMode::List && state.contains_job(job_id) {
                state.selected_job = Some(job_id);
            }
            Vec::new()
        }
        Msg::FileClicked(file_id) => {
            if state.viewer.is_none() {
                if let Some(pane) = state.files.as_mut() {
                    if pane.files.iter().any(|file| file.id == file_id) {
                        pane.selected_file = Some(file_id);
                    }
                }
            }
            Vec::new()
        }
        Msg::ViewerClicked(target) => {
            if target == ClickTarget::Backdrop {
                state.viewer = None;
            }
            Vec::new()
        }
        Msg::JobsLoaded(result) => {
            jobs_loaded(&mut state, result);
            Vec::new()
        }
        Msg::JobLoaded { job_id, result } => {
            if let Some(pane) = state.files.as_mut().filter(|pane| pane.job_id == job_id) {
                if let Ok(job) = result {
                    pane.job = Some(job);
                }
            }
            Vec::new()
        }
        Msg::JobCreated(result) => job_created(&mut state, result),
        Msg::JobDeleted { job_id, result } => match result {
            Ok(()) => {
                if state.selected_job == Some(job_id) {
                    state.selected_job = None;
                }
                request_jobs(&mut state)
            }
            Err(_) => {
                state.alert = Some(DELETE_JOB_FAILED.to_string());
                Vec::new()
            }
        },
        Msg::FilesLoaded { job_id, result } => {
            files_loaded(&mut state, job_id, result);
            Vec::new()
        }
        Msg::FileContentLoaded { file_id, result } => {
            content_loaded(&mut state, file_id, result);
            Vec::new()
        }
        Msg::FileStatusUpdated { result, .. } => match result {
            Ok(_) => request_files(&mut state),
            Err(_) => {
                state.alert = Some(UPDATE_STATUS_FAILED.to_string());
                Vec::new()
            }
        },
        Msg::ContentExported(result) => {
            state.notice = Some(match result {
                Ok(path) => format!("Saved copy to {}", path.display()),
                Err(err) => format!("Could not save copy: {err}"),
            });
            Vec::new()
        }
    };

    state.mark_dirty();
    (state, effects)
}

fn is_pointer_or_command(msg: &Msg) -> bool {
    matches!(
        msg,
        Msg::Command(_) | Msg::JobClicked(_) | Msg::FileClicked(_) | Msg::ViewerClicked(_)
    )
}

fn request_jobs(state: &mut AppState) -> Vec<Effect> {
    state.loading_jobs = true;
    vec![Effect::LoadJobs]
}

fn request_files(state: &mut AppState) -> Vec<Effect> {
    match state.files.as_mut() {
        Some(pane) => {
            pane.loading = true;
            vec![Effect::LoadFiles(pane.job_id), Effect::LoadJob(pane.job_id)]
        }
        None => Vec::new(),
    }
}

fn poll(state: &mut AppState) -> Vec<Effect> {
    if state.alert.is_some() {
        return Vec::new();
    }
    match state.mode {
        ViewMode::List if !state.loading_jobs => request_jobs(state),
        ViewMode::Files if state.files.as_ref().is_some_and(|pane| !pane.loading) => {
            request_files(state)
        }
        _ => Vec::new(),
    }
}

fn jobs_loaded(state: &mut AppState, result: Result<Vec<Job>, String>) {
    state.loading_jobs = false;
    let jobs = match result {
        Ok(jobs) => jobs,
        Err(_) => {
            state.alert = Some(LOAD_JOBS_FAILED.to_string());
            return;
        }
    };

    state.jobs = jobs;
    state.jobs_loaded = true;

    if let Some(preferred) = state.preferred_job.take() {
        if state.contains_job(preferred) {
            state.selected_job = Some(preferred);
            return;
        }
    }
    if state.mode == ViewMode::List {
        let still_present = state
            .selected_job
            .is_some_and(|job_id| state.contains_job(job_id));
        if !still_present {
            state.selected_job = state.jobs.first().map(|job| job.id);
        }
    }
}

fn job_created(state: &mut AppState, result: Result<Job, String>) -> Vec<Effect> {
    match result {
        Ok(job) => {
            if state.mode == ViewMode::Add {
                state.mode = ViewMode::List;
                state.form = None;
            }
            state.preferred_job = Some(job.id);
            request_jobs(state)
        }
        Err(_) => {
            if let Some(form) = state.form.as_mut() {
                form.submitting = false;
            }
            state.alert = Some(CREATE_JOB_FAILED.to_string());
            Vec::new()
        }
    }
}

fn files_loaded(state: &mut AppState, job_id: JobId, result: Result<Vec<JobFile>, String>) {
    // A late answer for a job whose files are no longer shown is dropped.
    let Some(pane) = state.files.as_mut().filter(|pane| pane.job_id == job_id) else {
        return;
    };
    pane.loading = false;
    pane.loaded = true;
    match result {
        Ok(files) => {
            pane.files = files;
            pane.load_error = None;
            let still_present = pane
                .selected_file
                .is_some_and(|file_id| pane.files.iter().any(|file| file.id == file_id));
            if !still_present {
                pane.selected_file = pane.files.first().map(|file| file.id);
            }
        }
        Err(_) => {
            pane.load_error = Some(LOAD_FILES_FAILED.to_string());
            // Rows already on screen stay; the failure goes to the status line.
            if !pane.files.is_empty() {
                state.notice = Some(LOAD_FILES_FAILED.to_string());
            }
        }
    }
}

fn content_loaded(state: &mut AppState, file_id: FileId, result: Result<String, String>) {
    let Some(viewer) = state.viewer.as_mut() else {
        return;
    };
    let awaiting = viewer.file_id == file_id
        && viewer.mode == ContentMode::Input
        && viewer.body == ViewerBody::Loading;
    if !awaiting {
        return;
    }
    let content = match result {
        Ok(text) => ViewerContent {
            language: viewer::input_language(&viewer.filename, &text),
            text,
        },
        Err(_) => ViewerContent {
            text: viewer::LOAD_FAILED_PLACEHOLDER.to_string(),
            language: DisplayLanguage::PlainText,
        },
    };
    viewer.body = ViewerBody::Ready(content);
}

fn handle_key(state: &mut AppState, key: KeyInput) -> Vec<Effect> {
    state.notice = None;

    if state.alert.is_some() {
        if matches!(key.key, Key::Escape | Key::Enter) {
            state.alert = None;
        }
        return Vec::new();
    }

    // An open viewer owns the keyboard, Escape included.
    if state.viewer.is_some() {
        return viewer_key(state, key);
    }

    match state.mode {
        ViewMode::List => match key.key {
            Key::Up if !key.command => move_job_selection(state, Step::Back),
            Key::Down if !key.command => move_job_selection(state, Step::Forward),
            _ => toolbar_command(state, &key),
        },
        ViewMode::Files => match key.key {
            Key::Up if !key.command => move_file_selection(state, Step::Back),
            Key::Down if !key.command => move_file_selection(state, Step::Forward),
            _ => toolbar_command(state, &key),
        },
        ViewMode::Add => form_key(state, key),
    }
}

fn toolbar_command(state: &mut AppState, key: &KeyInput) -> Vec<Effect> {
    match state.toolbar().command_for(key) {
        Some(command) => run_command(state, command),
        None => Vec::new(),
    }
}

fn viewer_key(state: &mut AppState, key: KeyInput) -> Vec<Effect> {
    let delta = match key.key {
        Key::Up => -1,
        Key::Down => 1,
        Key::PageUp => -PAGE_LINES,
        Key::PageDown => PAGE_LINES,
        Key::Home => i32::MIN,
        Key::End => i32::MAX,
        _ => return toolbar_command(state, &key),
    };
    if let Some(viewer) = state.viewer.as_mut() {
        viewer.scroll_by(delta);
    }
    Vec::new()
}

fn form_key(state: &mut AppState, key: KeyInput) -> Vec<Effect> {
    if let Some(command) = state.toolbar().command_for(&key) {
        return run_command(state, command);
    }
    let Some(form) = state.form.as_mut() else {
        return Vec::new();
    };
    if form.submitting {
        return Vec::new();
    }
    match key.key {
        Key::Tab | Key::Down => form.focus_next(),
        Key::BackTab | Key::Up => form.focus_prev(),
        Key::Backspace => form.backspace(),
        Key::Enter if form.focus == FormField::Mode => form.toggle_mode(),
        Key::Enter => return submit_form(state),
        _ => match key.text() {
            Some(' ') if form.focus == FormField::Mode => form.toggle_mode(),
            Some(c) => form.insert_char(c),
            None => {}
        },
    }
    Vec::new()
}

fn submit_form(state: &mut AppState) -> Vec<Effect> {
    let Some(form) = state.form.as_mut() else {
        return Vec::new();
    };
    if form.submitting {
        return Vec::new();
    }
    match form.validate() {
        Ok(new_job) => {
            form.submitting = true;
            form.error = None;
            vec![Effect::CreateJob(new_job)]
        }
        Err(message) => {
            form.error = Some(message.to_string());
            Vec::new()
        }
    }
}

fn run_command(state: &mut AppState, command: Command) -> Vec<Effect> {
    match command {
        Command::AddJob => {
            state.form = Some(JobForm::prefilled(state.jobs.first()));
            state.mode = ViewMode::Add;
            Vec::new()
        }
        Command::ViewFiles => open_files(state),
        Command::DeleteJob => match state.selected_job() {
            Some(job) => vec![Effect::DeleteJob(job.id)],
            None => Vec::new(),
        },
        Command::Refresh => match state.mode {
            ViewMode::List => request_jobs(state),
            ViewMode::Files => request_files(state),
            ViewMode::Add => Vec::new(),
        },
        Command::Quit => {
            state.quit = true;
            Vec::new()
        }
        Command::SaveForm if state.mode == ViewMode::Add => submit_form(state),
        Command::SaveForm => Vec::new(),
        Command::CancelForm => {
            state.form = None;
            if state.mode == ViewMode::Add {
                state.mode = ViewMode::List;
            }
            Vec::new()
        }
        Command::ViewContent(mode) => open_viewer(state, mode),
        Command::RequeueFile => match state.files.as_ref().and_then(FilesPane::selected) {
            Some(file) => vec![Effect::UpdateFileStatus {
                file_id: file.id,
                status: FileStatus::Init,
            }],
            None => Vec::new(),
        },
        Command::CloseFiles => {
            // The selected job survives the round trip through the file view.
            state.files = None;
            state.viewer = None;
            state.mode = ViewMode::List;
            Vec::new()
        }
        Command::ExportContent => match state.viewer.as_ref() {
            Some(viewer) => match viewer.content() {
                Some(content) => vec![Effect::ExportContent {
                    file_id: viewer.file_id,
                    filename: viewer.filename.clone(),
                    mode: viewer.mode,
                    text: content.text.clone(),
                }],
                None => Vec::new(),
            },
            None => Vec::new(),
        },
        Command::CloseViewer => {
            state.viewer = None;
            Vec::new()
        }
    }
}

fn open_files(state: &mut AppState) -> Vec<Effect> {
    let Some(job) = state.selected_job().cloned() else {
        return Vec::new();
    };
    let job_id = job.id;
    state.files = Some(FilesPane::new(job_id, Some(job)));
    state.viewer = None;
    state.mode = ViewMode::Files;
    vec![Effect::LoadFiles(job_id), Effect::LoadJob(job_id)]
}

fn open_viewer(state: &mut AppState, mode: ContentMode) -> Vec<Effect> {
    let Some(file) = state.files.as_ref().and_then(FilesPane::selected) else {
        return Vec::new();
    };
    let (body, effects) = match viewer::resolve(file, mode) {
        Resolution::Ready(content) => (ViewerBody::Ready(content), Vec::new()),
        Resolution::Fetch(file_id) => (ViewerBody::Loading, vec![Effect::LoadFileContent(file_id)]),
    };
    let viewer = ViewerState {
        file_id: file.id,
        filename: file.filename.clone(),
        mode,
        body,
        scroll: 0,
    };
    state.viewer = Some(viewer);
    effects
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Back,
    Forward,
}

/// Next index in a list of `len` rows, clamped at both ends.
fn step_index(current: Option<usize>, len: usize, step: Step) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let next = match (current, step) {
        (None, _) => 0,
        (Some(index), Step::Back) => index.saturating_sub(1),
        (Some(index), Step::Forward) => (index + 1).min(len - 1),
    };
    Some(next)
}

fn move_job_selection(state: &mut AppState, step: Step) -> Vec<Effect> {
    if let Some(index) = step_index(state.selected_job_index(), state.jobs.len(), step) {
        state.selected_job = Some(state.jobs[index].id);
    }
    Vec::new()
}

fn move_file_selection(state: &mut AppState, step: Step) -> Vec<Effect> {
    if let Some(pane) = state.files.as_mut() {
        let current = pane
            .selected_file
            .and_then(|file_id| pane.files.iter().position(|file| file.id == file_id));
        if let Some(index) = step_index(current, pane.files.len(), step) {
            pane.selected_file = Some(pane.files[index].id);
        }
    }
    Vec::new()
}
