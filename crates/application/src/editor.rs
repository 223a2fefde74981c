//! Dialog and form-draft state for create/edit flows.

use storerate_domain::{FormCatalog, FormType, FormValues, ValidationResult};

/// Open/closed state of one entity dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState<Id> {
    /// Dialog is not shown.
    #[default]
    Closed,
    /// Dialog creates a new entity.
    Creating,
    /// Dialog edits the entity with this identifier.
    Editing(Id),
}

impl<Id: Copy> EditorState<Id> {
    /// Returns whether the dialog is shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Returns the edited identifier, if editing.
    #[must_use]
    pub fn editing_id(&self) -> Option<Id> {
        match self {
            Self::Editing(id) => Some(*id),
            _ => None,
        }
    }
}

/// Values and field errors of a form being filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    form_type: FormType,
    values: FormValues,
    errors: ValidationResult,
}

impl FormDraft {
    /// Creates an empty draft.
    #[must_use]
    pub fn new(form_type: FormType) -> Self {
        Self::with_values(form_type, FormValues::new())
    }

    /// Creates a draft pre-filled with values.
    #[must_use]
    pub fn with_values(form_type: FormType, values: FormValues) -> Self {
        Self {
            form_type,
            values,
            errors: ValidationResult::default(),
        }
    }

    /// Sets a field value and clears that field's error.
    pub fn set_value(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        self.errors.clear_field(field.as_str());
        self.values.insert(field, value.into());
    }

    /// Validates the draft, keeping the errors for display.
    ///
    /// Returns whether the draft passed.
    pub fn validate(&mut self, forms: &FormCatalog) -> bool {
        self.errors = forms.rules(self.form_type).validate(&self.values);
        self.errors.is_valid()
    }

    /// Returns the form the draft belongs to.
    #[must_use]
    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    /// Returns the entered values.
    #[must_use]
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Returns a field value, empty when unset.
    #[must_use]
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or_default()
    }

    /// Returns errors from the last validation.
    #[must_use]
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }
}

/// Create/edit dialog for one entity type.
///
/// Each entity type owns its own dialog, so editing a store never changes
/// whether the user dialog is creating or editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDialog<Id> {
    state: EditorState<Id>,
    draft: FormDraft,
    create_form: FormType,
    edit_form: FormType,
}

impl<Id: Copy> EntityDialog<Id> {
    /// Creates a closed dialog using `create_form` for new entities and
    /// `edit_form` for existing ones.
    #[must_use]
    pub fn new(create_form: FormType, edit_form: FormType) -> Self {
        Self {
            state: EditorState::Closed,
            draft: FormDraft::new(create_form),
            create_form,
            edit_form,
        }
    }

    /// Opens the dialog with an empty create form.
    pub fn open_create(&mut self, defaults: FormValues) {
        self.state = EditorState::Creating;
        self.draft = FormDraft::with_values(self.create_form, defaults);
    }

    /// Opens the dialog editing `id` with its current values.
    pub fn open_edit(&mut self, id: Id, values: FormValues) {
        self.state = EditorState::Editing(id);
        self.draft = FormDraft::with_values(self.edit_form, values);
    }

    /// Closes the dialog and discards the draft.
    pub fn close(&mut self) {
        self.state = EditorState::Closed;
        self.draft = FormDraft::new(self.create_form);
    }

    /// Returns the dialog state.
    #[must_use]
    pub fn state(&self) -> EditorState<Id> {
        self.state
    }

    /// Returns the current draft.
    #[must_use]
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    /// Returns the current draft for editing.
    pub fn draft_mut(&mut self) -> &mut FormDraft {
        &mut self.draft
    }
}
