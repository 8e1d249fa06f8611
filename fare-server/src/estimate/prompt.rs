//! Prompt and output schema for the generative estimator.

use serde_json::{Value, json};

use super::policy::{PricingPolicy, ServiceClass};
use super::types::EstimateInput;

/// Output schema the provider is constrained to.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "estimatedFare": {
                "type": "NUMBER",
                "description": "Estimated fare per passenger in Indian rupees"
            },
            "nearbyOperators": {
                "type": "STRING",
                "description": "Comma-separated bus operators serving the route"
            }
        },
        "required": ["estimatedFare", "nearbyOperators"],
        "propertyOrdering": ["estimatedFare", "nearbyOperators"]
    })
}

/// Build the instruction text for one estimate.
pub fn build_prompt(input: &EstimateInput, policy: &PricingPolicy) -> String {
    let standard = policy.rates(ServiceClass::Standard);
    let luxury = policy.rates(ServiceClass::Luxury);
    let surcharge_pct = (policy.prime_time_surcharge * 100.0).round();

    format!(
        "You estimate intercity bus fares in India.\n\
         \n\
         Trip:\n\
         - Start location: {start}\n\
         - Destination: {destination}\n\
         - Distance: {distance:.1} km\n\
         - Bus type: {bus_type}\n\
         - Time of travel: {time}\n\
         \n\
         Pricing rules:\n\
         - Base fare: Standard {std_base} rupees, Luxury {lux_base} rupees.\n\
         - Per-km rate: Standard {std_km} rupees/km, Luxury {lux_km} rupees/km.\n\
         - Charge at least {floor:.0} km (a 24-hour journey) even for shorter trips.\n\
         - Add {surcharge_pct}% for travel between 18:00 and 22:00.\n\
         \n\
         Also list bus operators that commonly run services near the start \
         location or along this route.\n\
         \n\
         Reply with JSON containing estimatedFare (a number in rupees) and \
         nearbyOperators (a comma-separated string).",
        start = input.start_location,
        destination = input.destination,
        distance = input.distance_km,
        bus_type = input.bus_type,
        time = input.time_of_travel,
        std_base = standard.base_fare.as_rupees(),
        lux_base = luxury.base_fare.as_rupees(),
        std_km = standard.per_km.as_rupees(),
        lux_km = luxury.per_km.as_rupees(),
        floor = policy.min_billable_km,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_states_trip_and_rules() {
        let input = EstimateInput::new("Pune", "Panaji", 450.0, "Luxury", "evening").unwrap();
        let prompt = build_prompt(&input, &PricingPolicy::default());

        assert!(prompt.contains("Start location: Pune"));
        assert!(prompt.contains("Destination: Panaji"));
        assert!(prompt.contains("Distance: 450.0 km"));
        assert!(prompt.contains("Time of travel: evening"));
        assert!(prompt.contains("Standard 500 rupees, Luxury 1000 rupees"));
        assert!(prompt.contains("Standard 2 rupees/km, Luxury 3 rupees/km"));
        assert!(prompt.contains("at least 300 km"));
        assert!(prompt.contains("Add 20% for travel between 18:00 and 22:00"));
    }

    #[test]
    fn schema_requires_both_fields() {
        let schema = response_schema();
        assert_eq!(schema["required"], json!(["estimatedFare", "nearbyOperators"]));
        assert_eq!(schema["properties"]["estimatedFare"]["type"], "NUMBER");
        assert_eq!(schema["properties"]["nearbyOperators"]["type"], "STRING");
    }
}
