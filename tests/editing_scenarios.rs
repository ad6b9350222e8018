use prose::{
    apply, Command, Document, EditorConfig, EditorMode, LineEnding, LineIndex, TextBuffer,
    Workspace,
};

fn fresh_offsets(doc: &Document) -> Vec<usize> {
    LineIndex::build(doc.buffer()).offsets().to_vec()
}

#[test]
fn newline_split_updates_line_starts() {
    let mut doc = Document::from_text("ab\ncd");
    doc.move_cursor(1, false);
    doc.insert_text("\n");
    assert_eq!(doc.text(), "a\nb\ncd");
    assert_eq!(doc.line_index().offsets(), &[0, 2, 4]);
    assert_eq!(doc.line_index().offsets(), fresh_offsets(&doc).as_slice());
}

#[test]
fn soft_wrap_breaks_after_spaces() {
    let mut doc = Document::from_text("hello world wrapped text");
    doc.set_wrap_col(10);
    let starts: Vec<usize> = (0..doc.visual_row_count())
        .map(|row| doc.visual_row_start(row))
        .collect();
    assert_eq!(starts, vec![0, 6, 12, 20]);
    for row in 0..starts.len() {
        let end = doc.visual_row_end(row);
        let row_start = doc.visual_row_start(row);
        assert!(end - row_start <= 10, "row {} is wider than the budget", row);
    }
}

#[test]
fn space_on_the_budget_column_ends_the_row() {
    let mut doc = Document::from_text("hello world");
    doc.set_wrap_col(5);
    assert_eq!(doc.visual_row_count(), 2);
    assert_eq!(doc.visual_row_start(1), 6);
    let row_end = doc.visual_row_end(0);
    assert_eq!(doc.extract_text(0, row_end), "hello ");
}

#[test]
fn selection_replacement_undoes_in_one_step() {
    let mut doc = Document::from_text("abcdef");
    doc.set_selection(2, 5);
    doc.insert_text("XY");
    assert_eq!(doc.text(), "abXYf");
    doc.undo();
    assert_eq!(doc.text(), "abcdef");
    assert_eq!(doc.selection_range(), Some(2..5));
    assert_eq!(doc.cursor(), 5);
}

#[test]
fn undo_back_to_save_point_is_clean() {
    let mut doc = Document::from_text("saved");
    doc.mark_saved();
    doc.move_cursor(5, false);
    doc.insert_char('!');
    assert!(doc.is_modified());
    doc.undo();
    assert!(!doc.is_modified());
}

#[test]
fn oversized_delete_clamps_to_buffer_end() {
    let mut buffer = TextBuffer::from_text("12345");
    assert_eq!(buffer.delete(3, 100), 2);
    assert_eq!(buffer.to_text(), "123");
}

#[test]
fn replace_all_then_undo_restores_everything() {
    let mut doc = Document::from_text("the cat saw the other cat\nThe end");
    let before = doc.text();
    let outcome = apply(
        &mut doc,
        Command::ReplaceAll {
            query: "the".into(),
            replacement: "a".into(),
        },
    )
    .expect("replace all");
    assert_eq!(outcome.replaced, 4);
    assert_eq!(doc.text(), "a cat saw a oar cat\na end");
    assert_eq!(doc.line_index().offsets(), fresh_offsets(&doc).as_slice());
    apply(&mut doc, Command::Undo).expect("undo");
    assert_eq!(doc.text(), before);
}

#[test]
fn load_and_save_normalize_line_endings() {
    let config = EditorConfig {
        line_ending: LineEnding::CrLf,
        ..EditorConfig::default()
    };
    let doc = Document::from_bytes(b"\xEF\xBB\xBFone\ntwo\r\n", &config).expect("load");
    assert_eq!(doc.text(), "one\ntwo\n");
    assert_eq!(doc.line_count(), 3);
    assert_eq!(doc.to_bytes(), b"one\r\ntwo\r\n");
}

#[test]
fn workspace_keeps_documents_apart() {
    let mut workspace = Workspace::new(EditorConfig::default());
    let notes = workspace
        .open_bytes(b"draft", Some(std::path::Path::new("notes.md")))
        .expect("notes");
    let code = workspace
        .open_bytes(b"fn main() {", Some(std::path::Path::new("main.rs")))
        .expect("code");
    {
        let doc = workspace.get_mut(code).expect("code doc");
        doc.move_document_end(false);
        apply(doc, Command::InsertNewline).expect("newline");
        assert_eq!(doc.text(), "fn main() {\n    ");
    }
    let notes_doc = workspace.get(notes).expect("notes doc");
    assert_eq!(notes_doc.mode(), EditorMode::Prose);
    assert!(!notes_doc.is_modified());
    assert_eq!(workspace.modified(), vec![code]);
}
