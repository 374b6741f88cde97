pub mod list_work_items_query;
pub mod list_work_items_request;
pub mod list_work_items_response;
pub mod metadata;
pub mod paginated_work_items;
pub mod work_item;
pub mod work_item_dto;
pub mod work_item_status;
pub mod work_item_type;
