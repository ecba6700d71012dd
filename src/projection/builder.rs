//! Aggregate builders
//!
//! Fold flat joined rows back into nested orders. Both builders keep output
//! deterministic: orders come out in first-seen order and lines in the order
//! their rows arrived.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::domain::format_transaction_date;

use super::view::{
    MerchantSummary, OrderAggregate, OrderLineView, OrderRow, ProductSummary, UserSummary,
};

/// Groups rows of many orders, keyed by order id
#[derive(Debug, Default)]
pub struct OrderHistoryBuilder {
    index: HashMap<Uuid, usize>,
    orders: Vec<OrderAggregate>,
}

impl OrderHistoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row: a new order id opens an aggregate, a repeated one appends a line
    pub fn push(&mut self, row: OrderRow) {
        let line = line_from_row(&row);

        if let Some(&position) = self.index.get(&row.transaction_id) {
            self.orders[position].lines.push(line);
            return;
        }

        let mut order = header_from_row(row);
        order.lines.push(line);
        self.index.insert(order.id, self.orders.len());
        self.orders.push(order);
    }

    pub fn build(self) -> Vec<OrderAggregate> {
        self.orders
    }
}

impl FromIterator<OrderRow> for OrderHistoryBuilder {
    fn from_iter<I: IntoIterator<Item = OrderRow>>(rows: I) -> Self {
        let mut builder = Self::new();
        for row in rows {
            builder.push(row);
        }
        builder
    }
}

/// Builds a single order, dropping duplicate line rows
#[derive(Debug, Default)]
pub struct OrderDetailBuilder {
    order: Option<OrderAggregate>,
    seen_lines: HashSet<Uuid>,
}

impl OrderDetailBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row. Header, user and merchant come from the first row only.
    pub fn push(&mut self, row: OrderRow) {
        if !self.seen_lines.insert(row.transaction_detail_id) {
            return;
        }

        let line = line_from_row(&row);
        self.order
            .get_or_insert_with(|| header_from_row(row))
            .lines
            .push(line);
    }

    /// The built order, or a zero-valued aggregate when no rows were pushed
    pub fn build(self) -> OrderAggregate {
        self.order.unwrap_or_default()
    }
}

fn header_from_row(row: OrderRow) -> OrderAggregate {
    OrderAggregate {
        id: row.transaction_id,
        customer_name: row.customer_name,
        destination_number: row.destination_number,
        transaction_date: format_transaction_date(row.transaction_date),
        user: UserSummary {
            id: row.id_user,
            username: row.username,
            role: row.role,
        },
        merchant: MerchantSummary {
            id: row.id_merchant,
            name: row.name_merchant,
            address: row.address,
        },
        lines: Vec::new(),
    }
}

fn line_from_row(row: &OrderRow) -> OrderLineView {
    OrderLineView {
        id: row.transaction_detail_id,
        order_id: row.transaction_id,
        price: row.line_price,
        product: ProductSummary {
            id: row.id_product,
            provider_name: row.name_provider.clone(),
            nominal: row.nominal,
            price: row.product_price,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    struct Fixture {
        user_id: Uuid,
        merchant_id: Uuid,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                user_id: Uuid::new_v4(),
                merchant_id: Uuid::new_v4(),
            }
        }

        fn row(&self, order_id: Uuid, line_id: Uuid, day: u32) -> OrderRow {
            OrderRow {
                transaction_id: order_id,
                customer_name: "Siti".to_string(),
                destination_number: "081298765432".to_string(),
                transaction_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
                id_user: self.user_id,
                username: "counter01".to_string(),
                role: "user".to_string(),
                id_merchant: self.merchant_id,
                name_merchant: "Konter Pulsa Jaya".to_string(),
                address: "Jl. Merdeka 1".to_string(),
                transaction_detail_id: line_id,
                line_price: dec!(12000),
                id_product: Uuid::new_v4(),
                name_provider: "Telkomsel".to_string(),
                nominal: dec!(10000),
                product_price: dec!(12500),
            }
        }
    }

    #[test]
    fn test_history_groups_lines_by_order() {
        let fx = Fixture::new();
        let (newer, older) = (Uuid::new_v4(), Uuid::new_v4());
        let lines: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();

        let orders = vec![
            fx.row(newer, lines[0], 20),
            fx.row(newer, lines[1], 20),
            fx.row(older, lines[2], 10),
            fx.row(older, lines[3], 10),
        ]
        .into_iter()
        .collect::<OrderHistoryBuilder>()
        .build();

        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, newer);
        assert_eq!(orders[0].transaction_date, "20-03-2024");
        assert_eq!(orders[1].id, older);
        assert_eq!(orders[1].transaction_date, "10-03-2024");

        let ids: Vec<Uuid> = orders[0].lines.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![lines[0], lines[1]]);
        let ids: Vec<Uuid> = orders[1].lines.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![lines[2], lines[3]]);
    }

    #[test]
    fn test_history_handles_interleaved_rows() {
        let fx = Fixture::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

        let mut builder = OrderHistoryBuilder::new();
        builder.push(fx.row(a, Uuid::new_v4(), 5));
        builder.push(fx.row(b, Uuid::new_v4(), 5));
        builder.push(fx.row(a, Uuid::new_v4(), 5));

        let orders = builder.build();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, a);
        assert_eq!(orders[0].lines.len(), 2);
        assert_eq!(orders[1].lines.len(), 1);
    }

    #[test]
    fn test_history_embeds_user_merchant_and_product() {
        let fx = Fixture::new();
        let orders = OrderHistoryBuilder::from_iter([fx.row(Uuid::new_v4(), Uuid::new_v4(), 1)])
            .build();

        let order = &orders[0];
        assert_eq!(order.user.id, fx.user_id);
        assert_eq!(order.user.username, "counter01");
        assert_eq!(order.merchant.id, fx.merchant_id);
        assert_eq!(order.merchant.name, "Konter Pulsa Jaya");
        assert_eq!(order.lines[0].price, dec!(12000));
        assert_eq!(order.lines[0].product.nominal, dec!(10000));
        assert_eq!(order.lines[0].product.price, dec!(12500));
    }

    #[test]
    fn test_empty_history() {
        assert!(OrderHistoryBuilder::new().build().is_empty());
    }

    #[test]
    fn test_detail_deduplicates_lines() {
        let fx = Fixture::new();
        let order_id = Uuid::new_v4();
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

        let mut builder = OrderDetailBuilder::new();
        builder.push(fx.row(order_id, first, 15));
        builder.push(fx.row(order_id, second, 15));
        builder.push(fx.row(order_id, first, 15));

        let order = builder.build();
        assert_eq!(order.id, order_id);
        let ids: Vec<Uuid> = order.lines.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_detail_header_from_first_row() {
        let fx = Fixture::new();
        let order_id = Uuid::new_v4();

        let mut later = fx.row(order_id, Uuid::new_v4(), 15);
        later.customer_name = "Someone Else".to_string();

        let mut builder = OrderDetailBuilder::new();
        builder.push(fx.row(order_id, Uuid::new_v4(), 15));
        builder.push(later);

        let order = builder.build();
        assert_eq!(order.customer_name, "Siti");
        assert_eq!(order.lines.len(), 2);
    }

    #[test]
    fn test_detail_without_rows_is_zero_valued() {
        let order = OrderDetailBuilder::new().build();

        assert!(order.is_empty());
        assert_eq!(order, OrderAggregate::default());
        assert_eq!(order.transaction_date, "");
    }
}
