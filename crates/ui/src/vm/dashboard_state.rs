use fahm_core::model::ExamId;

/// Interaction state of the dashboard screen. Lock decisions never live
/// here; they are recomputed from the services on every load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardState {
    selected_exam: Option<ExamId>,
    exam_menu_open: bool,
    save_notice: Option<String>,
}

impl DashboardState {
    #[must_use]
    pub fn selected_exam(&self) -> Option<&ExamId> {
        self.selected_exam.as_ref()
    }

    #[must_use]
    pub fn exam_menu_open(&self) -> bool {
        self.exam_menu_open
    }

    /// Set when the last exam choice could not be persisted.
    #[must_use]
    pub fn save_notice(&self) -> Option<&str> {
        self.save_notice.as_deref()
    }

    pub fn exam_not_saved(&mut self) {
        self.save_notice =
            Some("Your exam choice could not be saved and will reset next time.".to_owned());
    }

    pub fn toggle_exam_menu(&mut self) {
        self.exam_menu_open = !self.exam_menu_open;
    }

    /// Switch exams and close the menu. Returns `false` if `exam` was
    /// already selected.
    pub fn choose_exam(&mut self, exam: ExamId) -> bool {
        self.exam_menu_open = false;
        self.save_notice = None;
        if self.selected_exam.as_ref() == Some(&exam) {
            return false;
        }
        self.selected_exam = Some(exam);
        true
    }
}
