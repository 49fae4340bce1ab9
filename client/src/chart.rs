//! Bookings grouped by ticket price for the chart display mode.

use eventdesk_core::model::Booking;
use serde::Serialize;
use std::fmt;

/// Price band of a booked event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PriceBucket {
    /// Below 100
    Cheap,
    /// 100 up to (not including) 200
    Normal,
    /// 200 and above
    Expensive,
}

impl PriceBucket {
    /// Every bucket, cheapest first
    pub const ALL: [Self; 3] = [Self::Cheap, Self::Normal, Self::Expensive];

    /// Bucket holding `price`
    #[must_use]
    pub fn for_price(price: f64) -> Self {
        if price < 100.0 {
            Self::Cheap
        } else if price < 200.0 {
            Self::Normal
        } else {
            Self::Expensive
        }
    }

    /// Chart label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cheap => "Cheap",
            Self::Normal => "Normal",
            Self::Expensive => "Expensive",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Cheap => 0,
            Self::Normal => 1,
            Self::Expensive => 2,
        }
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Number of bookings per [`PriceBucket`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BookingChart {
    counts: [usize; 3],
}

impl BookingChart {
    /// Count `bookings` by the price of the booked event
    #[must_use]
    pub fn from_bookings(bookings: &[Booking]) -> Self {
        let mut chart = Self::default();
        for booking in bookings {
            chart.counts[PriceBucket::for_price(booking.event.price).index()] += 1;
        }
        chart
    }

    /// Bookings in `bucket`
    #[must_use]
    pub const fn count(&self, bucket: PriceBucket) -> usize {
        self.counts[bucket.index()]
    }

    /// All bookings counted
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(bucket, count)` pairs, cheapest first
    pub fn bars(&self) -> impl Iterator<Item = (PriceBucket, usize)> + '_ {
        PriceBucket::ALL
            .into_iter()
            .map(|bucket| (bucket, self.count(bucket)))
    }
}
