use taskpad_core::view::render::EMPTY_PLACEHOLDER;
use taskpad_core::{render, Filter, Task, ViewEntry};

fn sample_tasks() -> Vec<Task> {
    let mut done = Task::new("done already", 1);
    done.completed = true;
    vec![Task::new("still open", 0), done]
}

#[test]
fn empty_list_renders_single_placeholder_and_zero_count() {
    let view = render(&[], Filter::All, None);

    assert_eq!(view.entries, vec![ViewEntry::Placeholder]);
    assert_eq!(view.count_label, "0 tasks");
    assert!(view.to_markup().contains(EMPTY_PLACEHOLDER));
}

#[test]
fn filtered_out_everything_still_shows_placeholder() {
    let tasks = vec![Task::new("active only", 0)];
    let view = render(&tasks, Filter::Completed, None);

    assert_eq!(view.entries, vec![ViewEntry::Placeholder]);
}

#[test]
fn count_label_uses_the_unfiltered_total() {
    let tasks = sample_tasks();
    let view = render(&tasks, Filter::Completed, None);

    assert_eq!(view.entries.len(), 1);
    assert_eq!(view.count_label, "2 tasks");
}

#[test]
fn one_task_count_is_singular() {
    let tasks = vec![Task::new("lonely", 0)];
    assert_eq!(render(&tasks, Filter::All, None).count_label, "1 task");
}

#[test]
fn script_text_is_escaped_out_of_the_markup() {
    let tasks = vec![Task::new("<script>alert(1)</script>", 0)];
    let view = render(&tasks, Filter::All, None);

    let ViewEntry::Task { text, .. } = &view.entries[0] else {
        panic!("expected a task entry");
    };
    assert!(!text.contains('<'));
    assert!(!text.contains('>'));

    let markup = view.to_markup();
    assert!(!markup.contains("<script>"));
    assert!(markup.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[test]
fn editing_task_renders_an_edit_entry_with_raw_prefill() {
    let tasks = vec![Task::new("a & b", 0)];
    let editing = tasks[0].id;
    let view = render(&tasks, Filter::All, Some(editing));

    assert_eq!(
        view.entries,
        vec![ViewEntry::Edit {
            id: editing,
            prefill: "a & b".to_string(),
        }]
    );
    // Markup emission still escapes the prefill.
    assert!(view.to_markup().contains("value=\"a &amp; b\""));
}

#[test]
fn stale_editing_id_renders_everything_in_display_mode() {
    let tasks = sample_tasks();
    let view = render(&tasks, Filter::All, Some(uuid::Uuid::new_v4()));

    assert!(view
        .entries
        .iter()
        .all(|entry| matches!(entry, ViewEntry::Task { .. })));
}

#[test]
fn render_is_idempotent_for_identical_inputs() {
    let tasks = sample_tasks();
    let first = render(&tasks, Filter::Active, None);
    let second = render(&tasks, Filter::Active, None);

    assert_eq!(first, second);
    assert_eq!(first.to_markup(), second.to_markup());
}

#[test]
fn completed_entries_carry_checked_state_in_markup() {
    let tasks = sample_tasks();
    let markup = render(&tasks, Filter::All, None).to_markup();

    assert!(markup.contains("task completed"));
    assert!(markup.contains("checkbox\" checked"));
}
