pub mod work_item_repository;
