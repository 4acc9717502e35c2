use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::helpers::display_width;

/// Fields of the "Add New Item" form, in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum ItemField {
    #[default]
    Title,
    Description,
    Tags,
}

impl ItemField {
    pub(crate) const ALL: [ItemField; 3] =
        [ItemField::Title, ItemField::Description, ItemField::Tags];

    pub(crate) fn label(self) -> &'static str {
        match self {
            ItemField::Title => "Title",
            ItemField::Description => "Description",
            ItemField::Tags => "Tags",
        }
    }

    /// Row of the field inside the form block.
    pub(crate) fn row(self) -> u16 {
        match self {
            ItemField::Title => 0,
            ItemField::Description => 1,
            ItemField::Tags => 2,
        }
    }

    pub(crate) fn next(self) -> Option<ItemField> {
        match self {
            ItemField::Title => Some(ItemField::Description),
            ItemField::Description => Some(ItemField::Tags),
            ItemField::Tags => None,
        }
    }

    pub(crate) fn previous(self) -> Option<ItemField> {
        match self {
            ItemField::Title => None,
            ItemField::Description => Some(ItemField::Title),
            ItemField::Tags => Some(ItemField::Description),
        }
    }
}

/// Width reserved for field labels so the three inputs line up.
pub(crate) const LABEL_WIDTH: usize = "Description: ".len();

/// Text typed into the add form.
#[derive(Default, Clone, Debug)]
pub(crate) struct ItemForm {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) tags: String,
}

impl ItemForm {
    fn value(&self, field: ItemField) -> &String {
        match field {
            ItemField::Title => &self.title,
            ItemField::Description => &self.description,
            ItemField::Tags => &self.tags,
        }
    }

    fn value_mut(&mut self, field: ItemField) -> &mut String {
        match field {
            ItemField::Title => &mut self.title,
            ItemField::Description => &mut self.description,
            ItemField::Tags => &mut self.tags,
        }
    }

    /// Append a printable character to `field`.
    pub(crate) fn push_char(&mut self, field: ItemField, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        self.value_mut(field).push(ch);
        true
    }

    pub(crate) fn backspace(&mut self, field: ItemField) {
        self.value_mut(field).pop();
    }

    pub(crate) fn clear_field(&mut self, field: ItemField) {
        self.value_mut(field).clear();
    }

    /// Hand the typed values over for insertion and reset the form. Values are
    /// passed through untouched; an empty title is allowed.
    pub(crate) fn take_inputs(&mut self) -> (String, String, String) {
        let form = std::mem::take(self);
        (form.title, form.description, form.tags)
    }

    /// Render a single labelled line. Only the title gets a placeholder, as a
    /// hint; it is not enforced.
    pub(crate) fn build_line(&self, field: ItemField, focused: bool) -> Line<'static> {
        let value = self.value(field);
        let display = match field {
            ItemField::Title if value.is_empty() => "<required>".to_string(),
            _ => value.clone(),
        };

        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!(
                "{:<width$}",
                format!("{}: ", field.label()),
                width = LABEL_WIDTH
            )),
            Span::styled(display, style),
        ])
    }

    /// Terminal columns taken by the value, for cursor placement.
    pub(crate) fn value_width(&self, field: ItemField) -> u16 {
        display_width(self.value(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_targets_the_given_field() {
        let mut form = ItemForm::default();
        for ch in "Book".chars() {
            assert!(form.push_char(ItemField::Title, ch));
        }
        assert!(form.push_char(ItemField::Tags, 'x'));
        assert!(!form.push_char(ItemField::Tags, '\n'));
        form.backspace(ItemField::Title);

        assert_eq!(form.title, "Boo");
        assert_eq!(form.tags, "x");
        assert_eq!(form.value_width(ItemField::Title), 3);
        for ch in "漢字".chars() {
            form.push_char(ItemField::Description, ch);
        }
        assert_eq!(form.value_width(ItemField::Description), 4);
    }

    #[test]
    fn take_inputs_resets_the_form() {
        let mut form = ItemForm {
            title: " Book ".to_string(),
            description: "A novel".to_string(),
            tags: "fiction".to_string(),
        };

        let inputs = form.take_inputs();

        assert_eq!(
            inputs,
            (
                " Book ".to_string(),
                "A novel".to_string(),
                "fiction".to_string()
            )
        );
        assert!(form.title.is_empty() && form.description.is_empty() && form.tags.is_empty());
    }

    #[test]
    fn field_order_wraps_to_none_at_the_ends() {
        assert_eq!(ItemField::Title.previous(), None);
        assert_eq!(ItemField::Tags.next(), None);
        assert_eq!(ItemField::Title.next(), Some(ItemField::Description));
        assert_eq!(ItemField::Tags.previous(), Some(ItemField::Description));
    }

    #[test]
    fn empty_title_shows_placeholder() {
        let form = ItemForm::default();
        let line = form.build_line(ItemField::Title, false);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "Title:       <required>");
    }
}
