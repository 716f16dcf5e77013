diesel::table! {
    category (id) {
        id -> Int4,
        name -> Text,
    }
}

diesel::table! {
    consumer_user (id) {
        id -> Int4,
        username -> Text,
        email -> Text,
        password -> Text,
        city_id -> Int4,
        state_id -> Int4,
    }
}

diesel::table! {
    farm (id) {
        id -> Int4,
        name -> Text,
        address -> Text,
        year_founded -> Nullable<Int4>,
        bio -> Nullable<Text>,
        city_id -> Int4,
        state_id -> Int4,
    }
}

diesel::table! {
    order (id) {
        id -> Uuid,
        shipping_address -> Text,
        purchase_date -> Date,
        delivered -> Nullable<Bool>,
        consumer_id -> Int4,
    }
}

diesel::table! {
    order_item (id) {
        id -> Int4,
        order_id -> Uuid,
        consumer_id -> Int4,
        farm_id -> Int4,
        produce_item_id -> Int4,
        quantity -> Int4,
    }
}

diesel::table! {
    produce_item (id) {
        id -> Int4,
        name -> Text,
        farm_id -> Int4,
        category_id -> Nullable<Int4>,
    }
}

diesel::joinable!(order -> consumer_user (consumer_id));
diesel::joinable!(order_item -> consumer_user (consumer_id));
diesel::joinable!(order_item -> farm (farm_id));
diesel::joinable!(order_item -> order (order_id));
diesel::joinable!(order_item -> produce_item (produce_item_id));
diesel::joinable!(produce_item -> category (category_id));

diesel::allow_tables_to_appear_in_same_query!(
    category,
    consumer_user,
    farm,
    order,
    order_item,
    produce_item,
);
