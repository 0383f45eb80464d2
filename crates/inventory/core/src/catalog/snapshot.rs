use super::{CatalogError, ItemCatalog, ItemDescriptor, ItemHandle};

/// In-memory catalog backed by a handle-sorted list of descriptors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    items: Vec<ItemDescriptor>,
}

impl CatalogSnapshot {
    /// Builds a catalog, rejecting duplicate handles.
    pub fn new(mut items: Vec<ItemDescriptor>) -> Result<Self, CatalogError> {
        items.sort_by_key(|item| item.handle());
        if let Some(pair) = items
            .windows(2)
            .find(|pair| pair[0].handle() == pair[1].handle())
        {
            return Err(CatalogError::DuplicateHandle(pair[0].handle()));
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCatalog for CatalogSnapshot {
    fn descriptor(&self, handle: ItemHandle) -> Option<ItemDescriptor> {
        self.items
            .binary_search_by_key(&handle, |item| item.handle())
            .ok()
            .map(|index| self.items[index])
    }

    fn all_descriptors(&self) -> Vec<ItemDescriptor> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Footprint;

    fn descriptor(handle: u32) -> ItemDescriptor {
        ItemDescriptor::new(ItemHandle(handle), Footprint::new(1, 1), 1).unwrap()
    }

    #[test]
    fn looks_up_by_handle() {
        let catalog = CatalogSnapshot::new(vec![descriptor(7), descriptor(2)]).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.descriptor(ItemHandle(7)), Some(descriptor(7)));
        assert_eq!(catalog.descriptor(ItemHandle(3)), None);
        assert_eq!(
            catalog.require(ItemHandle(3)),
            Err(CatalogError::ItemNotFound(ItemHandle(3)))
        );
    }

    #[test]
    fn rejects_duplicate_handles() {
        assert_eq!(
            CatalogSnapshot::new(vec![descriptor(1), descriptor(1)]),
            Err(CatalogError::DuplicateHandle(ItemHandle(1)))
        );
    }
}
