use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::ItemStore;
use crate::view::ViewState;

pub fn run<S: ItemStore>(store: &S, view: &ViewState) -> Result<CmdResult> {
    let records = store.list_all()?;
    Ok(CmdResult::default().with_listed_items(view.derive(&records)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::view::SortDirective;

    #[test]
    fn lists_everything_by_default() {
        let store = StoreFixture::new()
            .with_items(&[("pear", 1), ("apple", 4)])
            .store;
        let result = run(&store, &ViewState::default()).unwrap();
        assert_eq!(result.listed_items.len(), 2);
        assert_eq!(result.listed_items[0].name, "apple");
    }

    #[test]
    fn applies_search_and_sort() {
        let store = StoreFixture::new()
            .with_items(&[("pear", 1), ("apple", 4), ("grape", 2), ("fig", 9)])
            .store;
        let view = ViewState::new("P", SortDirective::CountDesc);
        let result = run(&store, &view).unwrap();

        let names: Vec<_> = result.listed_items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "grape", "pear"]);
    }
}
