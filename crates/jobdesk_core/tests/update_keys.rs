use chrono::NaiveDate;
use jobdesk_core::{
    update, AppState, Command, Effect, FileStatus, FormField, Job, JobFile, JobStatus, Key,
    KeyInput, Msg, NewJob, UploadMode, ViewMode, LOAD_FILES_FAILED, ZIP_REQUIRED,
};

fn job(id: u64) -> Job {
    Job {
        id,
        status: JobStatus::Completed,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|date| date.and_hms_opt(15, 4, 5))
            .unwrap(),
        user: "user@example.com".to_string(),
        folder_in: String::new(),
        folder_out: String::new(),
        files: Vec::new(),
    }
}

fn file(id: u64, job_id: u64) -> JobFile {
    JobFile {
        id,
        job_id,
        filename: format!("file{id}.txt"),
        filepath: format!("/in/file{id}.txt"),
        status: FileStatus::Init,
        content_out: None,
        error: None,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 2)
            .and_then(|date| date.and_hms_opt(15, 4, 5))
            .unwrap(),
        processed_at: None,
    }
}

fn press(state: AppState, key: Key) -> (AppState, Vec<Effect>) {
    update(state, Msg::Key(KeyInput::plain(key)))
}

fn type_text(mut state: AppState, text: &str) -> AppState {
    for c in text.chars() {
        state = press(state, Key::Char(c)).0;
    }
    state
}

fn with_jobs(ids: &[u64]) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Mounted);
    let (state, _) = update(state, Msg::JobsLoaded(Ok(ids.iter().copied().map(job).collect())));
    state
}

fn in_files(files: Vec<JobFile>) -> AppState {
    let state = with_jobs(&[1]);
    let (state, _) = press(state, Key::Enter);
    let (state, _) = update(
        state,
        Msg::FilesLoaded {
            job_id: 1,
            result: Ok(files),
        },
    );
    state
}

#[test]
fn arrows_move_job_selection_and_clamp() {
    let state = with_jobs(&[10, 20, 30]);
    assert_eq!(state.selected_job_id(), Some(10));

    let (state, _) = press(state, Key::Up);
    assert_eq!(state.selected_job_id(), Some(10));

    let (state, _) = press(state, Key::Down);
    let (state, _) = press(state, Key::Down);
    assert_eq!(state.selected_job_id(), Some(30));

    let (state, effects) = press(state, Key::Down);
    assert_eq!(state.selected_job_id(), Some(30));
    assert!(effects.is_empty());

    let (state, _) = press(state, Key::Up);
    assert_eq!(state.selected_job_id(), Some(20));
}

#[test]
fn arrows_on_empty_list_do_nothing() {
    let state = with_jobs(&[]);
    let (state, _) = press(state, Key::Down);
    assert_eq!(state.selected_job_id(), None);
}

#[test]
fn selecting_a_job_does_not_navigate() {
    let state = with_jobs(&[1, 2]);
    let (state, effects) = update(state, Msg::JobClicked(2));
    assert_eq!(state.mode(), ViewMode::List);
    assert!(effects.is_empty());
    assert_eq!(state.selected_job_id(), Some(2));
}

#[test]
fn enter_opens_files_of_selected_job() {
    let state = with_jobs(&[4, 5]);
    let (state, effects) = press(state, Key::Enter);

    assert_eq!(state.mode(), ViewMode::Files);
    assert_eq!(effects, vec![Effect::LoadFiles(4), Effect::LoadJob(4)]);
    assert_eq!(
        state.view().files.unwrap().placeholder.as_deref(),
        Some("Loading files...")
    );
}

#[test]
fn escape_closes_files_and_keeps_job_selection() {
    let state = with_jobs(&[1, 2]);
    let (state, _) = press(state, Key::Down);
    let (state, _) = press(state, Key::Enter);
    assert_eq!(state.mode(), ViewMode::Files);

    let (state, _) = press(state, Key::Escape);
    assert_eq!(state.mode(), ViewMode::List);
    assert_eq!(state.selected_job_id(), Some(2));
    assert!(state.files_pane().is_none());
}

#[test]
fn arrows_move_file_selection_in_files_view() {
    let state = in_files(vec![file(1, 1), file(2, 1)]);
    assert_eq!(state.selected_file_id(), Some(1));

    let (state, _) = press(state, Key::Down);
    assert_eq!(state.selected_file_id(), Some(2));
    let (state, _) = press(state, Key::Down);
    assert_eq!(state.selected_file_id(), Some(2));
    // Job selection is untouched while browsing files.
    assert_eq!(state.selected_job_id(), Some(1));
}

#[test]
fn late_files_for_another_job_are_dropped() {
    let state = in_files(vec![file(1, 1)]);
    let (state, _) = update(
        state,
        Msg::FilesLoaded {
            job_id: 99,
            result: Ok(vec![file(7, 99)]),
        },
    );
    let ids: Vec<_> = state
        .files_pane()
        .unwrap()
        .files
        .iter()
        .map(|file| file.id)
        .collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn failed_refresh_keeps_rows_on_screen() {
    let state = in_files(vec![file(10, 1), file(11, 1)]);
    let (state, effects) = update(state, Msg::PollElapsed);
    assert_eq!(effects, vec![Effect::LoadFiles(1), Effect::LoadJob(1)]);

    let (state, _) = update(
        state,
        Msg::FilesLoaded {
            job_id: 1,
            result: Err("timeout".to_string()),
        },
    );
    let view = state.view();
    let files = view.files.unwrap();
    assert_eq!(files.placeholder, None);
    let ids: Vec<_> = files.rows.iter().map(|row| row.file_id).collect();
    assert_eq!(ids, vec![10, 11]);
    assert!(files.rows[0].selected);
    assert_eq!(view.notice.as_deref(), Some(LOAD_FILES_FAILED));
}

#[test]
fn failed_first_load_shows_error_placeholder() {
    let state = with_jobs(&[1]);
    let (state, _) = press(state, Key::Enter);
    let (state, _) = update(
        state,
        Msg::FilesLoaded {
            job_id: 1,
            result: Err("timeout".to_string()),
        },
    );
    let view = state.view();
    let files = view.files.unwrap();
    assert!(files.rows.is_empty());
    assert_eq!(files.placeholder.as_deref(), Some(LOAD_FILES_FAILED));
    assert_eq!(view.notice, None);
}

#[test]
fn empty_file_list_shows_placeholder() {
    let state = in_files(Vec::new());
    let files = state.view().files.unwrap();
    assert!(files.rows.is_empty());
    assert_eq!(files.placeholder.as_deref(), Some("No files for this job"));
    assert_eq!(files.title, "Files for Job #1");
}

#[test]
fn requeue_patches_status_then_refetches_files() {
    let state = in_files(vec![file(3, 1)]);
    let (state, effects) = press(state, Key::Char('i'));
    assert_eq!(
        effects,
        vec![Effect::UpdateFileStatus {
            file_id: 3,
            status: FileStatus::Init,
        }]
    );

    let (_state, effects) = update(
        state,
        Msg::FileStatusUpdated {
            file_id: 3,
            result: Ok(file(3, 1)),
        },
    );
    assert_eq!(effects, vec![Effect::LoadFiles(1), Effect::LoadJob(1)]);
}

#[test]
fn escape_cancels_the_form() {
    let state = with_jobs(&[1]);
    let (state, _) = press(state, Key::Char('a'));
    assert_eq!(state.mode(), ViewMode::Add);

    let (state, effects) = press(state, Key::Escape);
    assert_eq!(state.mode(), ViewMode::List);
    assert!(state.form().is_none());
    assert!(effects.is_empty());
}

#[test]
fn save_chord_submits_only_in_form() {
    let state = with_jobs(&[1]);
    let (state, effects) = update(state, Msg::Key(KeyInput::chord(Key::Char('s'))));
    assert!(effects.is_empty());
    assert_eq!(state.mode(), ViewMode::List);

    let (state, _) = press(state, Key::Char('a'));
    let state = type_text(state, "/x");
    let (state, _) = press(state, Key::Tab);
    let state = type_text(state, "/y");
    let (state, effects) = update(state, Msg::Key(KeyInput::chord(Key::Char('s'))));
    assert_eq!(effects.len(), 1);
    assert!(matches!(effects[0], Effect::CreateJob(_)));
    // A second save while the first is in flight is ignored.
    let (_state, effects) = update(state, Msg::Key(KeyInput::chord(Key::Char('s'))));
    assert!(effects.is_empty());
}

#[test]
fn form_letters_are_typed_not_treated_as_hotkeys() {
    let (state, _) = update(AppState::new(), Msg::JobsLoaded(Ok(Vec::new())));
    let (state, _) = press(state, Key::Char('a'));
    let state = type_text(state, "dq");

    let form = state.form().unwrap();
    assert_eq!(form.folder_in, "dq");
    assert_eq!(state.mode(), ViewMode::Add);
    assert!(!state.should_quit());
}

#[test]
fn form_requires_both_folders() {
    let (state, _) = update(AppState::new(), Msg::JobsLoaded(Ok(Vec::new())));
    let (state, _) = press(state, Key::Char('a'));
    let state = type_text(state, "/in");
    let (state, effects) = press(state, Key::Enter);

    assert!(effects.is_empty());
    assert_eq!(
        state.form().unwrap().error.as_deref(),
        Some(jobdesk_core::FOLDERS_REQUIRED)
    );

    let (state, _) = press(state, Key::Tab);
    let state = type_text(state, "/out");
    let (_state, effects) = press(state, Key::Enter);
    assert_eq!(
        effects,
        vec![Effect::CreateJob(NewJob::Folders {
            folder_in: "/in".to_string(),
            folder_out: "/out".to_string(),
        })]
    );
}

#[test]
fn archive_mode_requires_zip_path() {
    let (state, _) = update(AppState::new(), Msg::JobsLoaded(Ok(Vec::new())));
    let (state, _) = press(state, Key::Char('a'));
    let (state, _) = press(state, Key::BackTab);
    assert_eq!(state.form().unwrap().focus, FormField::Mode);
    let (state, _) = press(state, Key::Char(' '));
    assert_eq!(state.form().unwrap().mode, UploadMode::Archive);

    let (state, _) = press(state, Key::Tab);
    let state = type_text(state, "batch.tar");
    let (state, effects) = update(state, Msg::Command(Command::SaveForm));
    assert!(effects.is_empty());
    assert_eq!(state.form().unwrap().error.as_deref(), Some(ZIP_REQUIRED));

    let mut state = state;
    for _ in 0..3 {
        state = press(state, Key::Backspace).0;
    }
    let state = type_text(state, "zip");
    let (_state, effects) = update(state, Msg::Command(Command::SaveForm));
    assert_eq!(
        effects,
        vec![Effect::CreateJob(NewJob::Upload {
            paths: vec!["batch.zip".into()],
        })]
    );
}

#[test]
fn quit_hotkey_sets_flag() {
    let state = with_jobs(&[1]);
    let (state, _) = press(state, Key::Char('q'));
    assert!(state.should_quit());
}

#[test]
fn disabled_toolbar_command_is_ignored() {
    let state = with_jobs(&[]);
    let (state, effects) = update(state, Msg::Command(Command::ViewFiles));
    assert!(effects.is_empty());
    assert_eq!(state.mode(), ViewMode::List);
}
