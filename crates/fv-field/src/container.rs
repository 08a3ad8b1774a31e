use crate::field::Field;

/// Ordered collection of fields returned by a result operator
/// (for example one field per body).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldsContainer {
    fields: Vec<Field>,
}

impl FieldsContainer {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn first(&self) -> Option<&Field> {
        self.fields.first()
    }

    pub fn get(&self, i: usize) -> Option<&Field> {
        self.fields.get(i)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn into_first(self) -> Option<Field> {
        self.fields.into_iter().next()
    }
}

impl IntoIterator for FieldsContainer {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<Field> for FieldsContainer {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
