use std::sync::Arc;

use crate::domain::cart::{Cart, CartItemInput, EnrichedCartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, CategoryClassifier, WeightExtractor};
use crate::domain::shipping::{CategoryLabel, ShippingRateTable};
use crate::domain::validation::check_quantity;
use crate::domain::weight::WeightSpec;

use super::blocking;

/// A line item whose free-text category resolved to a known label.
struct Classified {
    item: CartItemInput,
    label: CategoryLabel,
}

struct WeightExtracted {
    classified: Classified,
    weight: WeightSpec,
}

/// Cart operations, including the add-to-cart enrichment pipeline:
/// classify, extract weight, normalize to pounds, compute fee, upsert.
pub struct CartService {
    repo: Arc<dyn CartRepository>,
    classifier: Arc<dyn CategoryClassifier>,
    extractor: Arc<dyn WeightExtractor>,
    rates: ShippingRateTable,
}

impl CartService {
    pub fn new(
        repo: Arc<dyn CartRepository>,
        classifier: Arc<dyn CategoryClassifier>,
        extractor: Arc<dyn WeightExtractor>,
        rates: ShippingRateTable,
    ) -> Self {
        Self {
            repo,
            classifier,
            extractor,
            rates,
        }
    }

    pub async fn get_cart(&self, user_id: &str) -> Result<Cart, DomainError> {
        let repo = Arc::clone(&self.repo);
        let user_id = user_id.to_string();
        let items = blocking(move || repo.list_for_user(&user_id)).await?;
        Ok(Cart { items })
    }

    /// Run the enrichment pipeline for `item` and add it to the user's cart.
    /// Any failure rejects the whole request and nothing is persisted.
    pub async fn add_item(&self, user_id: &str, item: CartItemInput) -> Result<Cart, DomainError> {
        item.validate()?;

        let classified = self.classify(item).await?;
        let extracted = self.extract_weight(classified).await;
        let enriched = self.compute_fee(extracted)?;

        log::debug!(
            "Persisting {} for {} ({}, {:.3} lb, fee {:.4})",
            enriched.item.asin,
            user_id,
            enriched.normalized_category,
            enriched.weight_lb,
            enriched.shipping_fee
        );

        let repo = Arc::clone(&self.repo);
        let owner = user_id.to_string();
        blocking(move || repo.upsert_item(&owner, &enriched)).await?;

        self.get_cart(user_id).await
    }

    pub async fn remove_item(&self, user_id: &str, asin: &str) -> Result<Cart, DomainError> {
        let repo = Arc::clone(&self.repo);
        let (owner, asin) = (user_id.to_string(), asin.to_string());
        blocking(move || repo.remove_item(&owner, &asin)).await?;

        self.get_cart(user_id).await
    }

    /// Set the quantity of a line item; zero or less removes it.
    pub async fn update_quantity(
        &self,
        user_id: &str,
        asin: &str,
        quantity: i32,
    ) -> Result<Cart, DomainError> {
        if quantity <= 0 {
            return self.remove_item(user_id, asin).await;
        }
        check_quantity(asin, quantity)?;

        let repo = Arc::clone(&self.repo);
        let (owner, asin) = (user_id.to_string(), asin.to_string());
        blocking(move || repo.set_quantity(&owner, &asin, quantity)).await?;

        self.get_cart(user_id).await
    }

    async fn classify(&self, item: CartItemInput) -> Result<Classified, DomainError> {
        let prediction = self.classifier.classify(&item.category).await;

        if prediction.is_empty() {
            log::warn!(
                "Rejected {}: no category predicted for '{}'",
                item.asin,
                item.category
            );
            return Err(DomainError::ClassificationFailed);
        }

        // The classifier contract allows only the known labels; anything else
        // is treated like no prediction at all.
        let label = match prediction.prediction.parse::<CategoryLabel>() {
            Ok(label) => label,
            Err(_) => {
                log::warn!(
                    "Rejected {}: classifier answered unknown label '{}'",
                    item.asin,
                    prediction.prediction
                );
                return Err(DomainError::ClassificationFailed);
            }
        };

        log::debug!("Classified {} as {}", item.asin, label);
        Ok(Classified { item, label })
    }

    async fn extract_weight(&self, classified: Classified) -> WeightExtracted {
        let weight = self
            .extractor
            .extract(&classified.item.specifications)
            .await;

        if weight.is_missing() {
            log::debug!("No weight found for {}", classified.item.asin);
        }

        WeightExtracted { classified, weight }
    }

    fn compute_fee(&self, extracted: WeightExtracted) -> Result<EnrichedCartItem, DomainError> {
        let WeightExtracted { classified, weight } = extracted;
        let weight_lb = weight.to_pounds();

        let shipping_fee = self
            .rates
            .fee(classified.label, weight_lb)
            .inspect_err(|e| log::error!("Shipping rate lookup failed: {}", e))?;

        Ok(EnrichedCartItem {
            item: classified.item,
            normalized_category: classified.label,
            weight_lb,
            shipping_fee,
        })
    }
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Arc;

    use bigdecimal::BigDecimal;
    use serde_json::json;

    use super::fakes::{FixedClassifier, FixedExtractor, InMemoryCarts};
    use super::*;
    use crate::domain::shipping::ShippingRate;
    use crate::domain::weight::WeightUnit;

    fn item(asin: &str, quantity: i32) -> CartItemInput {
        CartItemInput {
            asin: asin.to_string(),
            quantity,
            title: "Audífonos inalámbricos".to_string(),
            price: BigDecimal::from_str("599.00").unwrap(),
            image_url: None,
            product_link: None,
            variant_asin: None,
            variant_dimensions: None,
            category: "Electrónicos > Audio".to_string(),
            specifications: json!({ "Peso del producto": "2 Kilogramos" }),
        }
    }

    struct Harness {
        repo: Arc<InMemoryCarts>,
        classifier: Arc<FixedClassifier>,
        extractor: Arc<FixedExtractor>,
        service: CartService,
    }

    fn harness(prediction: &str, weight: WeightSpec) -> Harness {
        harness_with_rates(prediction, weight, ShippingRateTable::standard())
    }

    fn harness_with_rates(prediction: &str, weight: WeightSpec, rates: ShippingRateTable) -> Harness {
        let repo = Arc::new(InMemoryCarts::default());
        let classifier = Arc::new(FixedClassifier::new(prediction));
        let extractor = Arc::new(FixedExtractor::new(weight));
        let service = CartService::new(
            repo.clone(),
            classifier.clone(),
            extractor.clone(),
            rates,
        );
        Harness {
            repo,
            classifier,
            extractor,
            service,
        }
    }

    #[tokio::test]
    async fn electronics_two_kilograms() {
        let h = harness("Electronics", WeightSpec::new("2", WeightUnit::Kilograms));

        let cart = h.service.add_item("user-1", item("B01", 1)).await.unwrap();

        assert_eq!(cart.items.len(), 1);
        let line = &cart.items[0];
        assert_eq!(line.normalized_category, "Electronics");
        assert!((line.weight_lb - 4.40924).abs() < 1e-9);
        assert!((line.shipping_fee - 6.69462).abs() < 1e-9);
    }

    #[tokio::test]
    async fn books_ignore_weight() {
        let h = harness("Books", WeightSpec::new("5", WeightUnit::Pounds));
        let cart = h.service.add_item("user-1", item("B02", 1)).await.unwrap();
        assert_eq!(cart.items[0].shipping_fee, 3.99);
    }

    #[tokio::test]
    async fn missing_weight_is_one_pound() {
        let h = harness("Office Products", WeightSpec::missing());
        let cart = h.service.add_item("user-1", item("B03", 1)).await.unwrap();
        assert_eq!(cart.items[0].weight_lb, 1.0);
        assert_eq!(cart.items[0].shipping_fee, 4.99);
    }

    #[tokio::test]
    async fn empty_prediction_is_rejected_before_anything_else() {
        let h = harness("", WeightSpec::new("2", WeightUnit::Kilograms));

        let err = h.service.add_item("user-1", item("B04", 1)).await.unwrap_err();

        assert!(matches!(err, DomainError::ClassificationFailed));
        assert_eq!(err.to_string(), "Could not determine product category");
        assert_eq!(*h.extractor.calls.lock().unwrap(), 0);
        assert!(h.repo.list_for_user("user-1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn label_outside_enumeration_is_rejected() {
        let h = harness("Groceries", WeightSpec::missing());

        let err = h.service.add_item("user-1", item("B05", 1)).await.unwrap_err();

        assert!(matches!(err, DomainError::ClassificationFailed));
        assert!(h.repo.list_for_user("user-1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn label_missing_from_rate_table_fails_without_persisting() {
        let rates = ShippingRateTable::new([(CategoryLabel::Books, ShippingRate::new(3.99, 0.0))]);
        let h = harness_with_rates("Electronics", WeightSpec::missing(), rates);

        let err = h.service.add_item("user-1", item("B06", 1)).await.unwrap_err();

        assert!(matches!(err, DomainError::UnknownCategory(_)));
        assert!(h.repo.list_for_user("user-1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_positive_quantity_is_invalid() {
        let h = harness("Electronics", WeightSpec::missing());

        let err = h.service.add_item("user-1", item("B07", 0)).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(*h.classifier.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn out_of_range_items_never_reach_the_classifier() {
        let h = harness("Electronics", WeightSpec::missing());

        let mut negative = item("B12", 1);
        negative.price = BigDecimal::from_str("-5").unwrap();
        let mut sub_cent = item("B12", 1);
        sub_cent.price = BigDecimal::from_str("599.999").unwrap();
        let mut too_large = item("B12", 1);
        too_large.price = BigDecimal::from_str("1e20").unwrap();
        let long_asin = item(&"B".repeat(33), 1);
        let empty_asin = item("", 1);
        let huge_quantity = item("B12", 10_001);

        for input in [negative, sub_cent, too_large, long_asin, empty_asin, huge_quantity] {
            let err = h.service.add_item("user-1", input).await.unwrap_err();
            assert!(matches!(err, DomainError::InvalidInput(_)));
        }
        assert_eq!(*h.classifier.calls.lock().unwrap(), 0);
        assert_eq!(*h.extractor.calls.lock().unwrap(), 0);
        assert!(h.repo.list_for_user("user-1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_quantity_above_limit_is_invalid() {
        let h = harness("Electronics", WeightSpec::missing());
        h.service.add_item("user-1", item("B13", 1)).await.unwrap();

        let err = h.service.update_quantity("user-1", "B13", 10_001).await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(h.repo.list_for_user("user-1").unwrap()[0].quantity, 1);
    }

    #[tokio::test]
    async fn adding_same_asin_twice_increments_quantity() {
        let h = harness("Electronics", WeightSpec::missing());

        h.service.add_item("user-1", item("B08", 2)).await.unwrap();
        let cart = h.service.add_item("user-1", item("B08", 3)).await.unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[tokio::test]
    async fn update_quantity_to_zero_removes_the_item() {
        let h = harness("Electronics", WeightSpec::missing());
        h.service.add_item("user-1", item("B09", 1)).await.unwrap();
        h.service.add_item("user-1", item("B10", 1)).await.unwrap();

        let cart = h.service.update_quantity("user-1", "B09", 4).await.unwrap();
        assert_eq!(cart.items.iter().find(|i| i.asin == "B09").unwrap().quantity, 4);

        let cart = h.service.update_quantity("user-1", "B09", 0).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].asin, "B10");
    }

    #[tokio::test]
    async fn remove_item_returns_remaining_cart() {
        let h = harness("Electronics", WeightSpec::missing());
        h.service.add_item("user-1", item("B11", 1)).await.unwrap();

        let cart = h.service.remove_item("user-1", "B11").await.unwrap();
        assert!(cart.items.is_empty());
    }
}
