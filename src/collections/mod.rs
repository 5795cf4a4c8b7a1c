pub mod linked_list;

pub use linked_list::{IntoIter, Iter, IterMut, LinkedList, LinkedListError, LinkedListResult};
