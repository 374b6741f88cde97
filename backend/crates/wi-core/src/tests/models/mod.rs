mod list_work_items_request;
mod metadata;
mod paginated_work_items;
mod work_item;
mod work_item_status;
mod work_item_type;
